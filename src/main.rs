fn main() -> anyhow::Result<()> {
    modorder::run()
}
