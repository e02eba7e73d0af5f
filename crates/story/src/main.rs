use anyhow::Context as _;
use gpui::*;
use gpui_app_list::AppListSnapshot;
use gpui_component::Root;
use tracing_subscriber::EnvFilter;

use gpui_app_list_story::app_list::AppListExample;

const DEFAULT_SNAPSHOT: &str = include_str!("../assets/app_list.json");

/// Load the snapshot named on the command line, or the bundled one.
fn load_snapshot() -> anyhow::Result<AppListSnapshot> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read snapshot {path}"))?;
            AppListSnapshot::from_json(&json).with_context(|| format!("invalid snapshot {path}"))
        }
        None => AppListSnapshot::from_json(DEFAULT_SNAPSHOT).context("invalid bundled snapshot"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let snapshot = load_snapshot()?;
    tracing::info!(items = snapshot.items.len(), "loaded app list snapshot");

    let app = Application::new();

    app.run(move |cx| {
        gpui_component::init(cx);
        gpui_dnd_app_list::init(cx);
        cx.activate(true);

        cx.spawn(async move |cx| {
            cx.open_window(
                WindowOptions {
                    titlebar: Some(TitlebarOptions {
                        title: Some("App List".into()),
                        appears_transparent: false,
                        traffic_light_position: None,
                    }),
                    ..Default::default()
                },
                |window, cx| {
                    let view = AppListExample::view(snapshot, window, cx);
                    cx.new(|cx| Root::new(view, window, cx))
                },
            )?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
