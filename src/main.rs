//! Facegate Kiosk CLI
//!
//! Interactive shell driving the unlock and enrollment flows against a
//! face-recognition backend.

use clap::Parser;
use facegate::capture::{Camera, CaptureService, CapturedImage, FileConfig, MockCamera};
use facegate::flow::{EnrollFlow, ImageSource, UnlockFlow};
use facegate::view::{self, Action, PageId, ViewRouter};
use facegate::{HttpBackend, RecognitionBackend};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "facegate", version, about = "Face-recognition unlock and enrollment kiosk")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the backend base URL.
    #[arg(long)]
    backend_url: Option<String>,

    /// Override the camera device index.
    #[arg(long)]
    device: Option<u32>,

    /// Use the synthetic mock camera instead of real hardware.
    #[arg(long)]
    mock_camera: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };
    if let Some(url) = args.backend_url {
        config.backend.base_url = url;
    }
    if let Some(device) = args.device {
        config.capture.device_id = device;
    }

    info!("Facegate kiosk v{}", facegate::VERSION);
    info!(backend = %config.backend.base_url, "Using recognition backend");

    let backend = HttpBackend::new(&config.backend);
    let service = CaptureService::new(config.capture.clone());

    #[cfg(feature = "camera")]
    if !args.mock_camera {
        let mut camera = facegate::capture::DeviceCamera::new();
        run_shell(&mut camera, &service, &backend).await;
        return;
    }

    if !args.mock_camera {
        warn!("Built without the `camera` feature; using the mock camera");
    }
    let mut camera = MockCamera::new();
    run_shell(&mut camera, &service, &backend).await;
}

/// Reads commands, resolves them against the active page's bindings,
/// and dispatches to the flows until the user quits.
async fn run_shell<C, B>(camera: &mut C, service: &CaptureService, backend: &B)
where
    C: Camera,
    B: RecognitionBackend,
{
    let mut router = ViewRouter::with_default_pages();
    let mut unlock = UnlockFlow::new();
    let mut enroll = EnrollFlow::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render(&router, &enroll);
    loop {
        let Some(page) = router.active() else {
            break;
        };

        print!("> ");
        let _ = std::io::stdout().flush();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            _ => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (word, rest) = match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (input, ""),
        };

        match view::resolve(page, word) {
            None => {
                println!("Unknown command.");
                print_bindings(page);
                continue;
            }
            Some(Action::Quit) => break,
            Some(Action::ShowUnlock) => {
                router.show_page(PageId::Unlock);
            }
            Some(Action::ShowEnroll) => {
                router.show_page(PageId::Enroll);
            }
            Some(Action::StartUnlock) => {
                unlock.run(&mut router, service, camera, backend).await;
            }
            Some(Action::SetEnrollName) => {
                if rest.is_empty() {
                    println!("Usage: name <your name>");
                    continue;
                }
                enroll.set_name(rest);
            }
            Some(Action::AttachEnrollFile) => {
                if rest.is_empty() {
                    println!("Usage: file <path>");
                    continue;
                }
                match tokio::fs::read(rest).await {
                    Ok(bytes) => {
                        enroll.attach_image(CapturedImage::new(bytes), ImageSource::File);
                        println!("Attached {}.", rest);
                    }
                    Err(e) => println!("Could not read {}: {}", rest, e),
                }
            }
            Some(Action::CaptureEnrollPhoto) => {
                enroll.capture_photo(&mut router, service, camera).await;
            }
            Some(Action::SubmitEnroll) => {
                enroll.submit(&mut router, backend).await;
            }
        }

        render(&router, &enroll);
    }
}

/// Prints the active page, its inline notice, and the enrollment draft
/// summary where relevant.
fn render(router: &ViewRouter, enroll: &EnrollFlow) {
    let Some(page) = router.active() else {
        return;
    };

    println!();
    match page {
        PageId::Unlock => {
            println!("== Unlock System ==");
            println!("Use your face to unlock access.");
        }
        PageId::UnlockCapturing => {
            println!("== Unlock System ==");
            println!("Capturing...");
        }
        PageId::Success => {
            println!("== Access granted ==");
        }
        PageId::Fail => {
            println!("== Access denied ==");
            println!("No matching face was found.");
        }
        PageId::Enroll => {
            println!("== Enroll New User ==");
            println!("Add yourself to the system.");
            let draft = enroll.draft();
            let name = if draft.name().is_empty() {
                "(not set)"
            } else {
                draft.name()
            };
            let photo = match draft.image_source() {
                Some(ImageSource::Camera) => "attached (camera)",
                Some(ImageSource::File) => "attached (file)",
                None => "(none)",
            };
            println!("Name: {}   Photo: {}", name, photo);
        }
    }
    if let Some(notice) = router.notice(page) {
        println!("{}", notice);
    }
    print_bindings(page);
}

fn print_bindings(page: PageId) {
    println!("Commands:");
    for binding in view::bindings(page) {
        println!("  {}", binding.help);
    }
}
