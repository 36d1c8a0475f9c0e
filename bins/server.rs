use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 等环境变量生效
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "staff-directory", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "staff-directory",
            event = "panic",
            %instance_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // 线程数：优先 config.toml，其次环境变量 TOKIO_WORKER_THREADS
    let worker_threads = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()),
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "staff-directory", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "staff-directory",
        event = "start",
        %instance_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "staff directory starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(server::run());

        tokio::select! {
            res = server_task => match res {
                Ok(Ok(())) => {
                    info!(service = "staff-directory", event = "stop", %instance_id, pid, "server stopped normally");
                    std::process::ExitCode::SUCCESS
                }
                Ok(Err(e)) => {
                    error!(service = "staff-directory", event = "run_failed", error = %format!("{e:#}"), "server::run returned error");
                    std::process::ExitCode::FAILURE
                }
                Err(e) => {
                    error!(service = "staff-directory", event = "task_join_error", error = %e, "server task join error");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "staff-directory", event = "shutdown_signal", %instance_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
