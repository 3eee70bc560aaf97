use anyhow::Result;
use specgen_server::AppState;
use std::path::Path;

pub fn run(root: &Path, provider: Option<&str>, port: u16) -> Result<()> {
    let config = super::load_config(root, provider)?;
    if config.provider.credential_from_env().is_none() {
        tracing::warn!(
            "{} is not set; /api/generate-tasks will fail until it is",
            config.provider.credential_vars().join(" or ")
        );
    }
    let state = AppState::from_config(root.to_path_buf(), config)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("specgen API → http://localhost:{actual_port}  (PID {})", std::process::id());

        tokio::select! {
            res = specgen_server::serve_on(state, listener) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
