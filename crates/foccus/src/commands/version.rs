pub fn run() -> anyhow::Result<()> {
    println!("foccus {}", env!("CARGO_PKG_VERSION"));
    println!("Coding time accounting from editor heartbeats");
    Ok(())
}
