//! Interactive viewer for orbitsim scenarios
//!
//! Paints the scene with a perspective camera, exposes per-body sliders and
//! start/stop/add/remove controls, and reloads the scenario file whenever it
//! changes on disk.

use crate::camera::Camera;
use egui::{Color32, Pos2, Rect, Stroke};
use glam::{DVec3, Vec3};
use notify::{Event, RecommendedWatcher, Watcher};
use orbitsim_core::{to_scene, BodyId, BodySpec, ScenarioConfig, Simulation};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc;

const AXES_SIZE: f32 = 10.0;
const BODY_RADIUS: f32 = 1.0;
const CENTRAL_RADIUS: f32 = 0.3;

/// Colours and starting points for bodies added from the toolbar
const PRESETS: [([u8; 3], [f64; 3], [f64; 3]); 3] = [
    ([0xff, 0xcc, 0xcb], [2.1e7, 0.0, 0.0], [0.0, 0.0, 5000.0]),
    ([0xcc, 0xff, 0xcc], [-2.1e7, 0.0, 0.0], [0.0, 0.0, -5000.0]),
    ([0xcc, 0xcc, 0xff], [0.0, 2.1e7, 0.0], [5000.0, 0.0, 0.0]),
];

fn preset_spec(index: usize) -> BodySpec {
    let (color, position, velocity) = PRESETS[index % PRESETS.len()];
    BodySpec {
        name: format!("Sphere {}", index + 1),
        position: DVec3::from_array(position),
        velocity: DVec3::from_array(velocity),
        color,
        ..BodySpec::default()
    }
}

/// A change requested from the body panel, applied after drawing it
enum BodyAction {
    Apply(BodyId),
    Remove(BodyId),
}

pub struct OrbitApp {
    scenario_path: Option<PathBuf>,
    config: ScenarioConfig,
    sim_opt: Option<Simulation>,
    /// Slider state per body; pushed into the simulation on "Apply"
    edits: HashMap<BodyId, BodySpec>,
    added: usize,
    camera: Camera,
    steps_per_frame: u32,
    last_error: Option<String>,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl OrbitApp {
    pub fn new(scenario_path: Option<PathBuf>, _cc: &eframe::CreationContext<'_>) -> Self {
        let (tx, rx) = mpsc::channel();
        let watcher = scenario_path.as_ref().and_then(|path| {
            let mut watcher = notify::recommended_watcher(move |res| {
                let _ = tx.send(res);
            })
            .ok()?;
            match watcher.watch(path, notify::RecursiveMode::NonRecursive) {
                Ok(()) => Some(watcher),
                Err(e) => {
                    log::warn!("not watching {}: {}", path.display(), e);
                    None
                }
            }
        });

        let mut app = Self {
            scenario_path,
            config: ScenarioConfig::default(),
            sim_opt: None,
            edits: HashMap::new(),
            added: 0,
            camera: Camera::default(),
            steps_per_frame: 1,
            last_error: None,
            file_watcher: watcher,
            file_receiver: rx,
        };
        app.reload();
        app
    }

    fn reload(&mut self) {
        let config = match &self.scenario_path {
            Some(path) => ScenarioConfig::load(path),
            None => Ok(ScenarioConfig::default()),
        };

        match config.and_then(|c| c.build_simulation().map(|sim| (c, sim))) {
            Ok((config, sim)) => {
                self.added = sim.len();
                self.config = config;
                self.sim_opt = Some(sim);
                self.edits.clear();
                self.last_error = None;
            }
            Err(e) => {
                log::error!("failed to load scenario: {}", e);
                self.last_error = Some(e.to_string());
                self.sim_opt = None;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    ..
                }) => needs_reload = true,
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            log::info!("scenario changed on disk, reloading");
            self.reload();
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let running = self.sim_opt.as_ref().is_some_and(|s| s.is_running());
            if ui.button(if running { "⏸ Stop" } else { "▶ Start" }).clicked() {
                if let Some(sim) = self.sim_opt.as_mut() {
                    sim.toggle();
                }
            }

            if ui.button("⏭ Step").clicked() {
                if let Some(sim) = self.sim_opt.as_mut() {
                    let report = sim.step_once();
                    record_stalls(&mut self.last_error, report.stalled);
                }
            }

            if ui.button("⏮ Reset").clicked() {
                if let Some(sim) = self.sim_opt.as_mut() {
                    if let Err(e) = sim.reset() {
                        self.last_error = Some(e.to_string());
                    }
                }
            }

            if ui.button("⟳ Reload").clicked() {
                self.reload();
            }

            if ui.button("➕ Add body").clicked() {
                if let Some(sim) = self.sim_opt.as_mut() {
                    match sim.add_body(preset_spec(self.added)) {
                        Ok(_) => self.added += 1,
                        Err(e) => self.last_error = Some(e.to_string()),
                    }
                }
            }

            ui.separator();
            ui.label("Steps/frame:");
            ui.add(egui::Slider::new(&mut self.steps_per_frame, 1..=50));

            ui.separator();
            if let Some(sim) = &self.sim_opt {
                ui.label(format!(
                    "Tick: {}   t = {:.1} h",
                    sim.ticks(),
                    sim.elapsed() / 3600.0
                ));
            }
        });
    }

    fn body_panel(&mut self, ui: &mut egui::Ui) {
        let Some(sim) = self.sim_opt.as_ref() else {
            return;
        };
        let constants = *sim.constants();
        let mut actions = Vec::new();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for slot in sim.bodies() {
                let edit = self
                    .edits
                    .entry(slot.id)
                    .or_insert_with(|| slot.spec.clone());

                egui::CollapsingHeader::new(slot.body.name.as_str())
                    .id_source(slot.id)
                    .default_open(true)
                    .show(ui, |ui| {
                        let accel =
                            orbitsim_core::acceleration(&constants, slot.body.pos, slot.body.mass);
                        ui.label(format!(
                            "r = {:.0} km   |v| = {:.1} m/s   |a| = {:.3} m/s²",
                            slot.body.altitude(&constants.central) / 1000.0,
                            slot.body.speed(),
                            accel.length()
                        ));
                        if slot.stalled {
                            ui.colored_label(Color32::RED, "stalled: non-finite state");
                        }

                        ui.label("Initial speed (m/s)");
                        ui.add(egui::Slider::new(&mut edit.velocity.x, -10_000.0..=10_000.0).text("x").clamp_to_range(false));
                        ui.add(egui::Slider::new(&mut edit.velocity.y, -10_000.0..=10_000.0).text("y").clamp_to_range(false));
                        ui.add(egui::Slider::new(&mut edit.velocity.z, -10_000.0..=10_000.0).text("z").clamp_to_range(false));

                        ui.label("Initial position (m)");
                        ui.add(egui::Slider::new(&mut edit.position.x, -5.0e7..=5.0e7).text("x").clamp_to_range(false));
                        ui.add(egui::Slider::new(&mut edit.position.y, -5.0e7..=5.0e7).text("y").clamp_to_range(false));
                        ui.add(egui::Slider::new(&mut edit.position.z, -5.0e7..=5.0e7).text("z").clamp_to_range(false));

                        ui.add(
                            egui::Slider::new(&mut edit.mass, 0.1..=1.0e10)
                                .logarithmic(true)
                                .clamp_to_range(false)
                                .text("mass (kg)"),
                        );

                        ui.horizontal(|ui| {
                            if ui.button("Apply").clicked() {
                                actions.push(BodyAction::Apply(slot.id));
                            }
                            if ui.button("Remove").clicked() {
                                actions.push(BodyAction::Remove(slot.id));
                            }
                        });
                    });
            }
        });

        for action in actions {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: BodyAction) {
        let Some(sim) = self.sim_opt.as_mut() else {
            return;
        };

        let result = match action {
            BodyAction::Apply(id) => match self.edits.get(&id) {
                Some(spec) => sim
                    .update_spec(id, spec.clone())
                    .and_then(|()| sim.reset_body(id)),
                None => Ok(()),
            },
            BodyAction::Remove(id) => {
                self.edits.remove(&id);
                sim.remove_body(id).map(|_| ())
            }
        };

        if let Err(e) = result {
            self.last_error = Some(e.to_string());
        }
    }

    fn scene(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::drag());
        let rect = response.rect;

        if response.dragged() {
            self.camera.orbit(response.drag_delta());
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll);
            }
        }

        painter.rect_filled(rect, 0.0, Color32::BLACK);
        self.draw_axes(&painter, rect);

        let Some(sim) = &self.sim_opt else {
            return;
        };
        let scale = self.config.display_scale;

        let central = to_scene(sim.constants().central.pos, scale).as_vec3();
        if let Some((center, depth)) = self.camera.project(central, rect) {
            let radius = self.camera.projected_size(CENTRAL_RADIUS, depth, rect).max(2.0);
            painter.circle_filled(center, radius, Color32::from_rgb(0x4a, 0x7d, 0xc9));
        }

        for slot in sim.bodies() {
            let [r, g, b] = slot.spec.color;
            let points: Vec<Pos2> = slot
                .trail
                .points()
                .filter_map(|p| self.camera.project(to_scene(*p, scale).as_vec3(), rect))
                .map(|(pos, _)| pos)
                .collect();
            if points.len() > 1 {
                painter.add(egui::Shape::line(
                    points,
                    Stroke::new(1.0, Color32::from_rgba_unmultiplied(r, g, b, 120)),
                ));
            }
        }

        // Far bodies first so near ones overlap them
        let mut sprites: Vec<(f32, Pos2, f32, Color32, &str)> = sim
            .bodies()
            .iter()
            .filter_map(|slot| {
                let scene = to_scene(slot.body.pos, scale).as_vec3();
                let (pos, depth) = self.camera.project(scene, rect)?;
                let radius = self
                    .camera
                    .projected_size(BODY_RADIUS, depth, rect)
                    .clamp(2.0, 40.0);
                let [r, g, b] = slot.spec.color;
                Some((depth, pos, radius, Color32::from_rgb(r, g, b), slot.body.name.as_str()))
            })
            .collect();
        sprites.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (_, pos, radius, color, name) in sprites {
            painter.circle_filled(pos, radius, color);
            painter.text(
                pos + egui::vec2(0.0, radius + 4.0),
                egui::Align2::CENTER_TOP,
                name,
                egui::FontId::default(),
                Color32::WHITE,
            );
        }
    }

    fn draw_axes(&self, painter: &egui::Painter, rect: Rect) {
        let half = AXES_SIZE * 0.5;
        let axes = [
            (Vec3::X, Color32::RED),
            (Vec3::Y, Color32::GREEN),
            (Vec3::Z, Color32::BLUE),
        ];
        for (dir, color) in axes {
            let from = self.camera.project(-dir * half, rect);
            let to = self.camera.project(dir * half, rect);
            if let (Some((a, _)), Some((b, _))) = (from, to) {
                painter.line_segment([a, b], Stroke::new(2.0, color));
            }
        }
    }
}

fn record_stalls(last_error: &mut Option<String>, stalled: Vec<orbitsim_core::SimError>) {
    if let Some(err) = stalled.into_iter().last() {
        *last_error = Some(err.to_string());
    }
}

impl eframe::App for OrbitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        if let Some(error) = self.last_error.clone() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format!("Error: {}", error)).color(Color32::RED));
                    if ui.small_button("dismiss").clicked() {
                        self.last_error = None;
                    }
                });
            });
        }

        egui::SidePanel::right("bodies")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.body_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.scene(ui));

        let mut running = false;
        if let Some(sim) = self.sim_opt.as_mut() {
            running = sim.is_running();
            for _ in 0..self.steps_per_frame {
                let report = sim.tick();
                record_stalls(&mut self.last_error, report.stalled);
            }
        }

        if running {
            ctx.request_repaint();
        }
    }
}
