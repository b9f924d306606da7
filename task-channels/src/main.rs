use test_dispatch_core::{ApiParam, DispatchConfig, Dispatcher, Host, Invocation, LogExecutor};

#[tokio::main]
async fn main() {
    let invocations = vec![
        Invocation::new(
            "fwk.vod",
            "play",
            vec![
                ApiParam::new("name", "movie.mpg"),
                ApiParam::new("loop", "false"),
            ],
        ),
        Invocation::new(
            "csw.gsm",
            "getModedata",
            vec![ApiParam::new("parameter", "hbMode")],
        ),
    ];
    let hosts = vec![
        Host::new("dsu1", "139.182.68.1"),
        Host::new("dsu2", "139.182.68.2"),
    ];

    let dispatcher = Dispatcher::new(LogExecutor, DispatchConfig::default());

    // Setup Ctrl+C handler
    let cancel_token = dispatcher.cancellation_token();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        cancel_token.cancel();
    });

    if let Err(report) = dispatcher.broadcast(&invocations, &hosts).await {
        eprintln!("{}", report);
    }

    println!("Done.");
}
