//! RepoLens Server Binary
//!
//! Standalone entry point - delegates to lib.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = repolens_core::load_config(None, &cwd)?;

    repolens_server::launch(config).await
}
