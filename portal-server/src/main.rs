use anyhow::Context;
use portal_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    setup_environment().map_err(|e| anyhow::anyhow!("environment setup failed: {e}"))?;

    print_banner();

    // 2. 加载配置
    let config = Config::from_env();
    if config.is_production() && config.admin_password == "admin" {
        tracing::warn!("⚠️  Running in production with the default admin password");
    }

    // 3. 初始化服务器状态 (数据库、初始管理员)
    let state = ServerState::initialize(&config)
        .await
        .context("failed to initialize server state")?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
