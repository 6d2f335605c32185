use anyhow::Result;

fn main() -> Result<()> {
    wordlink_cli::main_entry()
}
