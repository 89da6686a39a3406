fn main() -> anyhow::Result<()> {
    kana_trainer_lib::run()
}
