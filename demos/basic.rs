/*!
Try setting the `POWERTOOLS_LOG_LEVEL` environment variable to `info` and run this example.
*/

use lambda_logger::{info, Level, LogConfig, Logger, RequestContext};

fn main() {
    let mut logger = Logger::new(
        LogConfig::from_env()
            .property("service", "basic.rs")
            .inject_context(true),
    );

    info!(logger, "starting up");

    for request_id in &["Some Id", "Another Id"] {
        logger.start_invocation(&RequestContext::new(
            "arn:aws:lambda:eu-west-1:123456789012:function:basic",
            *request_id,
        ));

        let request = logger.enrich("operation", "request");
        info!(request, "handling a request for {}", "Timmy");

        request
            .event(Level::Debug)
            .field("table", "orders")
            .log("doing database stuff");
    }

    logger.trace("finishing up");
}
