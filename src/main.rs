fn main() -> anyhow::Result<()> {
    trpg_sessions_lib::run()
}
