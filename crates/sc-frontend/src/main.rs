//! STEP face coloring tool entry point

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sc_frontend=debug,sc_core=debug,sc_cad=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting {} v{}", sc_frontend::WINDOW_TITLE, env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([600.0, 480.0])
            .with_title(sc_frontend::WINDOW_TITLE)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "stepcolor",
        native_options,
        Box::new(|cc| Ok(Box::new(sc_frontend::StepColorApp::new(cc)))),
    )
}
