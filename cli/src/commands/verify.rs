use std::time::{Duration, Instant};

use colored::*;
use reflector_common::config::Config;
use reflector_common::network::ports::PortSelection;
use reflector_common::results::PortResults;
use reflector_common::{info, success, warn};
use reflector_core::network::SocketProber;
use reflector_core::runner::{self, Event, VerificationRequest};
use tracing::{Instrument, Span, debug, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{colors, print, progress};

pub async fn verify(
    request: &VerificationRequest,
    cfg: &Config,
) -> anyhow::Result<PortResults> {
    print_request(request);
    announce(request);

    let span: Span = info_span!("verification", indicatif.pb_show = true);
    span.pb_set_style(&progress::bar_style()?);
    span.pb_set_length(request.selection.len() as u64);

    let prober: SocketProber = SocketProber::from_config(cfg);
    let bar: Span = span.clone();
    let start_time: Instant = Instant::now();

    let results: PortResults = runner::run(&prober, request, cfg, move |event| {
        on_event(&bar, event)
    })
    .instrument(span)
    .await;

    verification_ends(request, &results, start_time.elapsed());
    Ok(results)
}

fn print_request(request: &VerificationRequest) {
    print::header("verification target");
    print::aligned_lines(&[
        ("Reflector", request.host.to_string().color(colors::ACCENT)),
        ("Protocol", request.protocol.to_string().to_uppercase().normal()),
        ("Ports", request.selection.len().to_string().normal()),
    ]);
}

fn announce(request: &VerificationRequest) {
    let protocol = request.protocol;
    match request.selection {
        PortSelection::Default(table) => info!(
            "Please wait while verifying {protocol} for {} ports: {} ...",
            table.name,
            request.selection.describe()
        ),
        PortSelection::Range(range) => info!(
            "Please wait while verifying {protocol} for port range: {} - {} ...",
            range.start(),
            range.end()
        ),
    }
}

fn on_event(bar: &Span, event: Event) {
    match event {
        Event::Checked(state) => {
            bar.pb_set_position(state.checked as u64);
            bar.pb_set_message(&progress::message(&state));
            // the bar is removed with its span, keep the last state on screen
            if let Some(line) = progress::final_message(&state) {
                print::print_status(line);
            }
        }
        Event::FirstPassFailures { ports, retries } => {
            warn!("Failed ports in the first try: {}", ports.join(", "));
            info!("Retrying ({retries} times) the above failed ports");
        }
        Event::RetryRound { round } => {
            print::print_status(format!("Retry number {round}"));
        }
        Event::Reverifying { port } => {
            debug!("Verifying port -> {port}");
        }
    }
}

fn verification_ends(request: &VerificationRequest, results: &PortResults, total_time: Duration) {
    let protocol = request.protocol;

    print::fat_separator();
    if results.has_failures() {
        let blocked: ColoredString = results
            .consolidated_failures()
            .join(", ")
            .color(colors::BLOCKED);
        warn!("Ports which are not open for {protocol} are: {blocked}");
    } else {
        success!(
            "No ports are blocked for {protocol} in {}",
            request.selection.describe()
        );
    }
    print_summary(results, total_time);
    print::fat_separator();
    print::end_of_program();
}

fn print_summary(results: &PortResults, total_time: Duration) {
    let open: ColoredString = format!("{} open", results.success_count())
        .bold()
        .color(colors::OPEN);
    let blocked: ColoredString = format!("{} blocked", results.failure_count())
        .bold()
        .color(colors::BLOCKED);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Verification Complete: {open}, {blocked} in {total_time}")
        .color(colors::TEXT_DEFAULT);

    print::centerln(&output.to_string());
}
