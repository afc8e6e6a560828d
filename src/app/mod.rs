use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::Context as _;
use eframe::egui::{self, Context};

use deps_explorer::packages::{
    DependencyMaps, PackageGraph, list_data_files, load_graph_file, resolve_data_file,
};
use deps_explorer::views::{InvestigateState, ListState, OrphansState, ViewMode};

mod canvas;
mod render_utils;
mod ui;

use canvas::GraphCanvas;

/// Start-up settings taken from the command line.
pub struct AppOptions {
    pub data_dir: PathBuf,
    pub file: Option<String>,
    pub view: ViewMode,
}

pub struct DepsExplorerApp {
    data_dir: PathBuf,
    files: Vec<String>,
    selected_file: Option<String>,
    view: ViewMode,
    state: LoadState,
}

enum LoadState {
    Idle,
    Loading {
        rx: Receiver<anyhow::Result<Snapshot>>,
    },
    Ready(Box<Workspace>),
    Error(String),
}

struct Snapshot {
    graph: PackageGraph,
    maps: DependencyMaps,
}

/// Everything derived from one loaded snapshot, plus per-view UI state.
struct Workspace {
    graph: PackageGraph,
    maps: DependencyMaps,
    list: ListState,
    orphans: OrphansState,
    investigate: InvestigateState,
    graph_canvas: Option<GraphCanvas>,
    tree_canvas: Option<GraphCanvas>,
    graph_search: String,
}

impl Workspace {
    fn new(snapshot: Snapshot) -> Self {
        Self {
            graph: snapshot.graph,
            maps: snapshot.maps,
            list: ListState::default(),
            orphans: OrphansState::default(),
            investigate: InvestigateState::default(),
            graph_canvas: None,
            tree_canvas: None,
            graph_search: String::new(),
        }
    }
}

impl DepsExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: AppOptions) -> Self {
        let mut app = Self {
            files: Self::scan_files(&options.data_dir),
            data_dir: options.data_dir,
            selected_file: None,
            view: options.view,
            state: LoadState::Idle,
        };

        if let Some(file) = options.file {
            app.select_file(file);
        }

        app
    }

    fn scan_files(data_dir: &Path) -> Vec<String> {
        match list_data_files(data_dir) {
            Ok(files) => {
                tracing::info!(count = files.len(), dir = %data_dir.display(), "found data files");
                files
            }
            Err(error) => {
                tracing::error!("{error:#}");
                Vec::new()
            }
        }
    }

    fn rescan(&mut self) {
        self.files = Self::scan_files(&self.data_dir);
    }

    fn select_file(&mut self, name: String) {
        let path = resolve_data_file(&self.data_dir, &name);
        tracing::info!(path = %path.display(), "loading package snapshot");
        // a pending receiver for an older selection is dropped here
        self.state = LoadState::Loading {
            rx: Self::spawn_load(path),
        };
        self.selected_file = Some(name);
    }

    fn spawn_load(path: PathBuf) -> Receiver<anyhow::Result<Snapshot>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_graph_file(&path)
                .with_context(|| format!("failed to load {}", path.display()))
                .map(|graph| {
                    let maps = graph.dependency_maps();
                    Snapshot { graph, maps }
                });
            let _ = tx.send(result);
        });

        rx
    }

    fn set_view(&mut self, view: ViewMode) {
        if self.view != view {
            tracing::debug!(from = ?self.view, to = ?view, "switching view");
            self.view = view;
        }
    }

    fn poll_loading(&mut self) {
        let LoadState::Loading { rx } = &self.state else {
            return;
        };

        let next = match rx.try_recv() {
            Ok(Ok(snapshot)) => {
                let counts = snapshot.graph.counts();
                tracing::info!(
                    total = counts.total,
                    explicit = counts.explicit,
                    dependencies = counts.dependency,
                    links = snapshot.graph.links().len(),
                    "package snapshot loaded"
                );
                LoadState::Ready(Box::new(Workspace::new(snapshot)))
            }
            Ok(Err(error)) => {
                tracing::error!("{error:#}");
                LoadState::Error(format!("{error:#}"))
            }
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                LoadState::Error("Background load worker disconnected".to_owned())
            }
        };

        self.state = next;
    }

    fn loaded_graph(&self) -> Option<&PackageGraph> {
        match &self.state {
            LoadState::Ready(workspace) => Some(&workspace.graph),
            _ => None,
        }
    }
}

impl eframe::App for DepsExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_loading();

        let action = self.draw_header(ctx);
        match action {
            Some(ui::HeaderAction::SelectFile(name)) => self.select_file(name),
            Some(ui::HeaderAction::Rescan) => self.rescan(),
            Some(ui::HeaderAction::SwitchView(view)) => self.set_view(view),
            None => {}
        }

        let view = self.view;
        egui::CentralPanel::default().show(ctx, |ui| match &mut self.state {
            LoadState::Idle => ui::empty_state(ui, view.empty_message()),
            LoadState::Loading { .. } => {
                ui::loading_state(ui);
                ui.ctx().request_repaint();
            }
            LoadState::Error(error) => ui::error_state(ui, error),
            LoadState::Ready(workspace) => workspace.show(ui, view),
        });
    }
}
