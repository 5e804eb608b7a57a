fn main() {
    starbatch::app::cli::run();
}
