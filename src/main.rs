use anyhow::Result;

fn main() -> Result<()> {
    harbor_setup::app::run()
}
