use axum::{
    routing::{get, post},
    Router,
};
use invoice_extract_rust::{api, AppConfig, ExtractorService, FormRecognizerClient};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!(
        "Starting server, azure endpoint: {}, model: {}",
        config.azure.endpoint, config.azure.model_id
    );

    // 创建文档识别客户端 (进程级共享)
    let client = FormRecognizerClient::new(config.azure.clone())?;
    let service = Arc::new(ExtractorService::new(client));

    // 构建路由
    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/api/invoice/extract", post(api::extract_invoice))
        .with_state(service)
        .layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /health               - Health check");
    info!("  POST /api/invoice/extract  - Invoice extraction (multipart file)");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
