//! `ytmp3 download <inputs...>` – download URLs or search hits as MP3.
//!
//! One input runs in foreground mode with a live progress line; several
//! inputs run as background jobs reporting into the visual queue.

use anyhow::{bail, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use ytmp3_core::coordinator::{Coordinator, JobOutcome, JobRequest};
use ytmp3_core::progress::ProgressUpdate;
use ytmp3_core::queue::{QueueManager, QueueTimings, SlotPhase};
use ytmp3_core::urls::{classify_input, InputKind};

pub async fn run_download(
    coordinator: Arc<Coordinator>,
    inputs: &[String],
    max_active: usize,
) -> Result<()> {
    if inputs.len() == 1 {
        let req = resolve_input(&coordinator, &inputs[0]).await?;
        let outcome = run_with_progress(&coordinator, &req).await?;
        println!("Guardado en {}", outcome.path.display());
        return Ok(());
    }
    run_many(coordinator, inputs, max_active).await
}

/// Foreground run with a live progress line on stderr. Also used by
/// `playlist --download`.
pub(super) async fn run_with_progress(
    coordinator: &Coordinator,
    req: &JobRequest,
) -> Result<JobOutcome> {
    let (tx, mut rx) = mpsc::channel::<ProgressUpdate>(64);
    let printer = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            eprint!("\r[{:>3.0}%] {:<60}", update.percent, update.message);
        }
        eprintln!();
    });

    let result = coordinator.run_foreground(req, &tx).await;
    drop(tx);
    let _ = printer.await;
    Ok(result?)
}

/// Resolve raw input into a request: URLs download directly, anything else
/// searches and takes the top hit.
async fn resolve_input(coordinator: &Coordinator, input: &str) -> Result<JobRequest> {
    match classify_input(input) {
        InputKind::Url => Ok(JobRequest::Single {
            url: input.trim().to_string(),
            video: None,
        }),
        InputKind::Search => {
            let results = coordinator.api().search(input.trim()).await?;
            let Some(video) = results.into_iter().next() else {
                bail!("sin resultados para: {input}");
            };
            println!("Descargando el primer resultado: {}", video.title);
            Ok(JobRequest::Single {
                url: video.url.clone(),
                video: Some(video),
            })
        }
        InputKind::Invalid => {
            bail!("Introduce al menos 2 caracteres para buscar")
        }
    }
}

async fn run_many(
    coordinator: Arc<Coordinator>,
    inputs: &[String],
    max_active: usize,
) -> Result<()> {
    let queue = QueueManager::new(max_active, QueueTimings::default());
    let mut tasks = tokio::task::JoinSet::new();
    for input in inputs {
        let req = resolve_input(&coordinator, input).await?;
        let title = req.display_title();
        let coordinator = Arc::clone(&coordinator);
        let queue = queue.clone();
        tasks.spawn(async move {
            let result = coordinator.run_background(&req, &queue).await;
            (title, result)
        });
    }

    let mut failures = 0usize;
    let mut ticker = tokio::time::interval(Duration::from_millis(500));
    loop {
        tokio::select! {
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok((title, Ok(outcome)))) => {
                    eprintln!("\r✔ {title} -> {}", outcome.filename);
                }
                Some(Ok((title, Err(e)))) => {
                    failures += 1;
                    eprintln!("\r✖ {title}: {e}");
                }
                Some(Err(e)) => {
                    failures += 1;
                    eprintln!("\rtarea abortada: {e}");
                }
            },
            _ = ticker.tick() => render_queue_line(&queue),
        }
    }

    println!("{} de {} descargas completadas", inputs.len() - failures, inputs.len());
    if failures > 0 {
        bail!("{failures} descargas fallaron");
    }
    Ok(())
}

fn render_queue_line(queue: &QueueManager) {
    let snap = queue.snapshot();
    if snap.dormant {
        return;
    }
    let line: Vec<String> = snap
        .active
        .iter()
        .map(|slot| {
            let mark = match slot.phase {
                SlotPhase::Running => format!("{:>3.0}%", slot.percent),
                SlotPhase::Done | SlotPhase::Removing => "✔".to_string(),
            };
            format!("{} {}", mark, slot.job.title)
        })
        .collect();
    let pending = snap.pending.len();
    if pending > 0 {
        eprint!("\r{} (+{} en cola)   ", line.join(" | "), pending);
    } else {
        eprint!("\r{}   ", line.join(" | "));
    }
}
