fn main() -> Result<(), Box<dyn std::error::Error>> {
    easel::runtime::modal_process::run()
}
