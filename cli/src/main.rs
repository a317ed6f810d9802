//! areacheck command-line client.
//!
//! Talks to the areacheck server over HTTP. `check` evaluates the local
//! preview verdict through the same `points` crate the server links, then
//! compares it against the authoritative server verdict: a disagreement
//! means the client and server builds have diverged.

use clap::{Parser, Subcommand};
use points::plot::{PlotPoint, PlotView};
use points::{Coordinates, PointCheck, is_in_area};
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Validation(#[from] points::ValidateError),
    #[error("missing session id; pass --session or set AREACHECK_SESSION")]
    MissingSession,
}

#[derive(Parser, Debug)]
#[command(name = "areacheck-cli", about = "Area check API client")]
struct Cli {
    #[arg(long, env = "AREACHECK_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Session id to act on; omit to let the server mint one on submit.
    #[arg(long, env = "AREACHECK_SESSION")]
    session: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe server liveness.
    Ping,
    /// Submit a point, previewing the verdict locally first.
    Check {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long)]
        r: f64,
        /// Evaluate locally without submitting.
        #[arg(long)]
        preview_only: bool,
    },
    /// Fetch session history, newest first.
    Results {
        /// Render the history as a plot instead of a table.
        #[arg(long)]
        plot: bool,
    },
    /// Clear the session history on the server.
    Clear,
}

#[derive(Debug, Deserialize)]
struct ResultsPayload {
    results: Vec<PointCheck>,
}

struct Context {
    base_url: String,
    session: Option<String>,
    client_id: Uuid,
    http: reqwest::Client,
}

impl Context {
    fn cookie_header(&self) -> Option<String> {
        self.session.as_ref().map(|id| format!("sessionId={id}"))
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let ctx = Context {
        base_url: cli.base_url.trim_end_matches('/').to_owned(),
        session: cli.session,
        client_id: Uuid::new_v4(),
        http: reqwest::Client::new(),
    };

    let outcome = match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Check { x, y, r, preview_only } => run_check(&ctx, x, y, r, preview_only).await,
        Command::Results { plot } => run_results(&ctx, plot).await,
        Command::Clear => run_clear(&ctx).await,
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run_ping(ctx: &Context) -> Result<(), CliError> {
    let response = ctx.http.get(format!("{}/healthz", ctx.base_url)).send().await?;
    println!("{}", response.status());
    Ok(())
}

async fn run_check(ctx: &Context, x: f64, y: f64, r: f64, preview_only: bool) -> Result<(), CliError> {
    Coordinates::new(x, y, r).validate()?;

    let preview = is_in_area(x, y, r);
    println!("preview: ({x}, {y}) at r={r} -> {}", verdict_word(preview));
    if preview_only {
        return Ok(());
    }

    let mut request = ctx
        .http
        .post(format!("{}/api/check", ctx.base_url))
        .header("X-Client-Id", ctx.client_id.to_string())
        .form(&[
            ("xVal", x.to_string()),
            ("yVal", y.to_string()),
            ("rVal", r.to_string()),
        ]);
    if let Some(cookie) = ctx.cookie_header() {
        request = request.header(COOKIE, cookie);
    }

    let response = request.send().await?;
    let status = response.status();
    let session_id = extract_session_cookie(response.headers());
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CliError::Server { status: status.as_u16(), message: server_message(&body) });
    }

    let payload: ResultsPayload = serde_json::from_str(&body)?;
    if let Some(latest) = payload.results.first() {
        println!(
            "server:  ({}, {}) at r={} -> {}",
            latest.x,
            latest.y,
            latest.r,
            verdict_word(latest.is_in_area)
        );
        if latest.is_in_area != preview {
            eprintln!(
                "warning: server verdict disagrees with the local preview; \
                 client and server builds have diverged"
            );
        }
    }
    if let Some(id) = session_id {
        println!("session: {id}");
    }
    println!("history: {} result(s)", payload.results.len());
    Ok(())
}

async fn run_results(ctx: &Context, plot: bool) -> Result<(), CliError> {
    let mut request = ctx.http.get(format!("{}/api/results", ctx.base_url));
    if let Some(cookie) = ctx.cookie_header() {
        request = request.header(COOKIE, cookie);
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CliError::Server { status: status.as_u16(), message: server_message(&body) });
    }

    let payload: ResultsPayload = serde_json::from_str(&body)?;
    if payload.results.is_empty() {
        println!("no results");
    } else if plot {
        print!("{}", render_plot(&payload.results));
    } else {
        print_table(&payload.results);
    }
    Ok(())
}

async fn run_clear(ctx: &Context) -> Result<(), CliError> {
    let cookie = ctx.cookie_header().ok_or(CliError::MissingSession)?;
    let response = ctx
        .http
        .delete(format!("{}/api/session", ctx.base_url))
        .header(COOKIE, cookie)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CliError::Server { status: status.as_u16(), message: server_message(&body) });
    }
    println!("session cleared");
    Ok(())
}

fn verdict_word(inside: bool) -> &'static str {
    if inside { "inside" } else { "outside" }
}

/// Pull the `sessionId` value out of any `Set-Cookie` response header.
fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| {
            let (name, rest) = raw.split_once('=')?;
            if name.trim() != "sessionId" {
                return None;
            }
            let value = rest.split(';').next().unwrap_or_default().trim();
            (!value.is_empty()).then(|| value.to_owned())
        })
}

fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

fn print_table(results: &[PointCheck]) {
    println!(
        "{:>8} {:>8} {:>4}  {:^7}  {:<19} {:>10}",
        "x", "y", "r", "verdict", "checked at", "ms"
    );
    for record in results {
        println!(
            "{:>8} {:>8} {:>4}  {:^7}  {:<19} {:>10.3}",
            record.x,
            record.y,
            record.r,
            verdict_word(record.is_in_area),
            record.checked_at,
            record.elapsed_ms
        );
    }
}

/// Render history as a character grid through the shared plot mapping.
///
/// Terminal cells are taller than wide, so each text row samples two rows
/// of a virtual square canvas and the plot reads roughly square.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn render_plot(results: &[PointCheck]) -> String {
    const COLS: usize = 61;
    const ROWS: usize = 31;
    const SCALE: f64 = 5.0;

    // The area itself is shaded for the most recent r.
    let r = results.first().map_or(3.0, |record| record.r);
    let view = PlotView::new(COLS as f64, (ROWS * 2) as f64, SCALE);

    let mut grid = vec![vec![' '; COLS]; ROWS];
    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let world =
                view.canvas_to_world(PlotPoint::new(col as f64 + 0.5, row as f64 * 2.0 + 1.0));
            let on_y_axis = world.x.abs() < 0.5 / SCALE;
            let on_x_axis = world.y.abs() < 1.0 / SCALE;
            *cell = match (on_y_axis, on_x_axis) {
                (true, true) => '+',
                (true, false) => '|',
                (false, true) => '-',
                (false, false) if is_in_area(world.x, world.y, r) => '.',
                (false, false) => ' ',
            };
        }
    }

    // Oldest first so the newest record wins contested cells.
    for record in results.iter().rev() {
        let canvas = view.world_to_canvas(PlotPoint::new(record.x, record.y));
        let col = canvas.x.round() as isize;
        let row = (canvas.y / 2.0).round() as isize;
        if (0..COLS as isize).contains(&col) && (0..ROWS as isize).contains(&row) {
            grid[row as usize][col as usize] = if record.is_in_area { 'o' } else { 'x' };
        }
    }

    let mut out = String::new();
    for cells in &grid {
        out.extend(cells.iter());
        out.push('\n');
    }
    out.push_str(&format!("r={r}  o inside  x outside  . area\n"));
    out
}
