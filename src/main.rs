use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use drug_tools::mcp::{MCPServer, Server};
use drug_tools::tools::{recalls, shortages};
use drug_tools::{DrugTools, DrugToolsConfig};

/// FDA 药品信息工具 - 药品短缺、召回和说明书查询
#[derive(Parser)]
#[command(name = "drug-tools")]
#[command(about = "FDA drug shortages, recalls and medication profiles via an MCP server")]
#[command(version)]
struct Cli {
    /// MCP 服务器地址（覆盖 MCP_SERVER_URL）
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// 请求超时秒数（覆盖 MCP_TIMEOUT_SECS）
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 以 stdio MCP 服务器方式运行
    Serve,
    /// 查询药品短缺
    Shortages {
        drug_name: String,
        #[arg(short, long, default_value_t = shortages::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// 获取药品说明书概要
    Profile {
        drug_name: String,
    },
    /// 查询药品召回
    Recalls {
        drug_name: String,
        #[arg(short, long, default_value_t = recalls::DEFAULT_LIMIT)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 日志写到 stderr，stdout 留给协议输出
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("drug_tools=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = DrugToolsConfig::from_env()?;
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout_secs(timeout);
    }
    info!("🌐 MCP服务器: {} (超时 {}s)", config.server_url, config.timeout_secs);

    let tools = DrugTools::new(config)?;

    match cli.command {
        Commands::Serve => serve(tools).await?,
        Commands::Shortages { drug_name, limit } => {
            println!("{}", tools.search_drug_shortages(&drug_name, Some(limit)).await);
        }
        Commands::Profile { drug_name } => {
            println!("{}", tools.get_medication_profile(&drug_name).await);
        }
        Commands::Recalls { drug_name, limit } => {
            println!("{}", tools.search_drug_recalls(&drug_name, Some(limit)).await);
        }
    }

    Ok(())
}

async fn serve(tools: DrugTools) -> Result<()> {
    let mcp_server = MCPServer::new();

    for tool in tools.into_tools() {
        let name = tool.name().to_string();
        match mcp_server.register_tool(tool).await {
            Ok(()) => info!("✅ 工具已注册: {}", name),
            Err(e) => warn!("⚠️ 注册工具 {} 失败: {}", name, e),
        }
    }
    info!("📋 服务器工具总数: {}", mcp_server.get_tool_count().await);

    let mut server = Server::new(
        "drug-tools".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
        mcp_server,
    );
    server.run().await
}
