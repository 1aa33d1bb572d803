use crate::input::{PointerSnapshot, PointerTranslator};
use crate::notifications::NotificationManager;
use crate::painter::{paint_ellipse, paint_line, to_pos2};
use crate::settings::{AppSettings, ThemeMode};
use crate::theme::{self, CanvasPalette};
use egui::{Color32, Stroke};
use egui_phosphor::regular as ph;
use mindfull_canvas::{CanvasController, FrameScheduler, MutedAwareAudio, PortVisualState};
use mindfull_core::Vec2;
use mindfull_events::InputEvent;
use mindfull_storage::MemoryStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const INITIAL_VIEWPORT: Vec2 = Vec2::new(1280.0, 680.0);

pub struct MindfullApp {
    settings: AppSettings,
    store: MemoryStore,
    canvas: CanvasController,
    scheduler: FrameScheduler,
    muted: Arc<AtomicBool>,
    notifications: NotificationManager,
    pointer: PointerTranslator,
    viewport: Option<Vec2>,
    mounted: bool,
    applied_theme: Option<ThemeMode>,
}

impl MindfullApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();
        let audio = MutedAwareAudio::new(settings.muted, settings.effect_volume);
        let muted = audio.mute_handle();
        let canvas =
            CanvasController::new(settings.canvas.clone(), INITIAL_VIEWPORT).with_audio(audio);

        Self {
            notifications: NotificationManager::new(settings.show_notifications),
            settings,
            store: MemoryStore::with_defaults(),
            canvas,
            scheduler: FrameScheduler::new(),
            muted,
            pointer: PointerTranslator::default(),
            viewport: None,
            mounted: false,
            applied_theme: None,
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(format!("{} Inner Space", ph::SPARKLE));
            ui.separator();

            egui::ComboBox::from_id_salt("theme")
                .selected_text(format!("{} {}", ph::PALETTE, self.settings.theme.label()))
                .show_ui(ui, |ui| {
                    for mode in ThemeMode::ALL {
                        ui.selectable_value(&mut self.settings.theme, mode, mode.label());
                    }
                });

            let icon = if self.settings.muted {
                ph::SPEAKER_SLASH
            } else {
                ph::SPEAKER_HIGH
            };
            if ui.button(icon).on_hover_text("Toggle sound").clicked() {
                self.settings.muted = !self.settings.muted;
                self.muted.store(self.settings.muted, Ordering::Relaxed);
            }
            if ui
                .checkbox(&mut self.settings.show_notifications, ph::BELL)
                .on_hover_text("Show notifications")
                .changed()
            {
                self.notifications
                    .set_enabled(self.settings.show_notifications);
            }

            ui.separator();
            ui.label(format!(
                "{} memories  {} pathways",
                self.canvas.nodes().len(),
                self.canvas.graph().len()
            ));
            ui.weak("Drag ports to connect. Right-click a pathway to remove it.");
        });
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let origin = rect.min;

        let size = Vec2::new(rect.width(), rect.height());
        if self.viewport != Some(size) {
            self.viewport = Some(size);
            self.canvas.handle_input(&InputEvent::ViewportResized {
                width: size.x,
                height: size.y,
            });
        }
        if !self.mounted {
            self.mounted = true;
            if let Err(err) = self.canvas.mount_grid(self.store.card_labels()) {
                tracing::error!("Failed to mount memories: {err}");
            }
        }

        let snapshot = ui.input(|i| PointerSnapshot {
            pos: i
                .pointer
                .interact_pos()
                .map(|p| Vec2::new(p.x - origin.x, p.y - origin.y)),
            over_canvas: response.hovered(),
            primary_pressed: i.pointer.primary_pressed(),
            secondary_pressed: i.pointer.secondary_pressed(),
            primary_released: i.pointer.primary_released(),
        });
        for event in self.pointer.translate(snapshot) {
            self.canvas.handle_input(&event);
        }

        self.scheduler.step(&mut self.canvas);

        let palette = CanvasPalette::for_mode(self.settings.theme);
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, palette.background);
        self.paint_pathways(&painter, origin);
        self.paint_cards(&painter, origin, &palette);
        if let Some(preview) = self.canvas.preview() {
            paint_line(&painter, origin, preview);
        }
    }

    fn paint_pathways(&self, painter: &egui::Painter, origin: egui::Pos2) {
        for connection in self.canvas.graph().iter() {
            let visuals = &connection.visuals;
            paint_line(painter, origin, &visuals.glow_line);
            paint_line(painter, origin, &visuals.trail);
            paint_ellipse(painter, origin, &visuals.halo);
            paint_ellipse(painter, origin, &visuals.particle);
        }
    }

    fn paint_cards(&self, painter: &egui::Painter, origin: egui::Pos2, palette: &CanvasPalette) {
        let radius = 12.0;
        let port_radius = self.canvas.settings().port_size / 2.0;

        for node in self.canvas.nodes().iter() {
            let card = egui::Rect::from_min_max(
                to_pos2(origin, node.rect().min),
                to_pos2(origin, node.rect().max),
            );
            painter.rect_filled(
                card.translate(egui::vec2(0.0, 3.0)),
                radius,
                Color32::from_black_alpha(60),
            );
            painter.rect_filled(card, radius, palette.card_fill);
            painter.rect_stroke(
                card,
                radius,
                Stroke::new(1.0, palette.card_border),
                egui::StrokeKind::Middle,
            );
            painter.text(
                card.center() - egui::vec2(0.0, 10.0),
                egui::Align2::CENTER_CENTER,
                ph::BRAIN,
                egui::FontId::proportional(22.0),
                palette.card_subtext,
            );
            painter.text(
                card.center() + egui::vec2(0.0, 18.0),
                egui::Align2::CENTER_CENTER,
                &node.label,
                egui::FontId::proportional(15.0),
                palette.card_text,
            );

            for port in node.ports() {
                let Some(pos) = self.canvas.port_position(&port) else {
                    continue;
                };
                let color = match self.canvas.port_state(&port) {
                    PortVisualState::Idle => palette.port_idle,
                    PortVisualState::Active => palette.port_active,
                    PortVisualState::HoverTarget => palette.port_hover,
                };
                painter.circle_filled(to_pos2(origin, pos), port_radius, color);
                painter.circle_stroke(
                    to_pos2(origin, pos),
                    port_radius,
                    Stroke::new(1.5, palette.background),
                );
            }
        }
    }
}

impl eframe::App for MindfullApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.scheduler.cancellation_token().cancel();
        self.settings.save();
        tracing::info!(
            frames = self.scheduler.frames(),
            pathways = self.canvas.graph().len(),
            "Exiting"
        );
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_theme != Some(self.settings.theme) {
            tracing::info!("Applying theme: {:?}", self.settings.theme);
            theme::apply(ctx, self.settings.theme);
            self.applied_theme = Some(self.settings.theme);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.canvas_ui(ui));

        self.canvas.events().dispatch_to(&mut self.notifications);
        self.notifications.render(ctx);

        if self.scheduler.is_running() {
            ctx.request_repaint();
        }
    }
}
