fn main() {
    anbn::cli::run();
}
