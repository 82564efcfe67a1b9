// ui.rs - egui rendering and input for the board window

use conway::Cell;
use eframe::egui;
use egui::epaint::Hsva;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::Instant;

use crate::GameOfLife;

/// Live cells shift from light blue towards red as they age (capped at 10).
fn age_color(cell: &Cell) -> Color32 {
    let age = cell.age().min(10) as f32;
    let hue = (0.5 + age / 20.0) % 1.0;
    Color32::from(Hsva::new(hue, 1.0, 1.0, 1.0))
}

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let until_next = self.poll_timer();

        egui::SidePanel::right("log_panel")
            .min_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Log");
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in self.controller.log() {
                            ui.label(line.trim_end());
                        }
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            let paused = self.controller.is_paused();

            // Simulation controls
            ui.horizontal(|ui| {
                let button_text = if paused { "▶ Start" } else { "⏸ Pause" };
                if ui.button(button_text).clicked() {
                    self.controller.start_pause();
                    self.last_update = Instant::now();
                }

                if ui.add_enabled(paused, egui::Button::new("⏭ Next")).clicked() {
                    self.controller.next_generation();
                }

                if ui.add_enabled(paused, egui::Button::new("⏹ Clear")).clicked() {
                    self.controller.clear();
                }

                if ui.add_enabled(paused, egui::Button::new("🎲 Random")).clicked() {
                    self.random_seed = self.random_seed.wrapping_add(1);
                    if let Err(err) = self.controller.randomize(self.random_seed) {
                        tracing::warn!(error = %err, "randomize failed");
                    }
                }

                ui.separator();
                ui.label(format!("Generation: {}", self.controller.generation()));
            });

            // Board size and pattern placement
            ui.horizontal(|ui| {
                ui.label("Size:");
                ui.add(egui::DragValue::new(&mut self.size_box).clamp_range(1..=200));
                if ui.add_enabled(paused, egui::Button::new("Resize")).clicked() {
                    if let Err(err) = self.controller.resize(self.size_box) {
                        tracing::warn!(error = %err, "resize failed");
                    }
                }

                ui.separator();

                ui.label("Pattern:");
                let names: Vec<String> = self.controller.library().names().map(String::from).collect();
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(self.selected_pattern.as_str())
                    .show_ui(ui, |ui| {
                        for name in &names {
                            ui.selectable_value(&mut self.selected_pattern, name.clone(), name.as_str());
                        }
                    });

                ui.label("X:");
                ui.add(egui::DragValue::new(&mut self.origin_x).clamp_range(0..=199));
                ui.label("Y:");
                ui.add(egui::DragValue::new(&mut self.origin_y).clamp_range(0..=199));

                if ui.add_enabled(paused, egui::Button::new("Load Pattern")).clicked() {
                    let name = self.selected_pattern.clone();
                    self.controller.load_pattern(&name, self.origin_x, self.origin_y);
                }
            });

            // Speed and zoom
            ui.horizontal(|ui| {
                let mut frame_rate = self.controller.frame_rate();
                if ui
                    .add(egui::Slider::new(&mut frame_rate, 1..=60).text("Frame Rate"))
                    .changed()
                {
                    self.controller.set_frame_rate(frame_rate);
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.cell_size, 4.0..=40.0).text("Zoom"));
            });

            ui.separator();

            let board = self.controller.board();
            let (width, height) = (board.width(), board.height());
            let alive = self.controller.alive_cells();
            let total = width * height;

            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", alive));
                ui.label(format!("Dead cells: {}", total - alive));
                ui.label(format!(
                    "Population: {:.1}%",
                    (alive as f32 / total as f32) * 100.0
                ));
            });

            ui.separator();

            // Draw the board; scroll to pan when it outgrows the window
            let box_size = self.cell_size;
            let spacing = 0.5;
            let mut clicked = None;

            egui::ScrollArea::both().show(ui, |ui| {
                let start_pos = ui.cursor().min;
                let total_size = Vec2::new(
                    (box_size + spacing) * width as f32 - spacing,
                    (box_size + spacing) * height as f32 - spacing,
                );

                let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

                painter.rect_filled(
                    Rect::from_min_size(start_pos, total_size),
                    0.0,
                    Color32::from_gray(200),
                );

                for (x, y, cell) in self.controller.board().grid().iter() {
                    let rect = Rect::from_min_size(
                        egui::pos2(
                            start_pos.x + x as f32 * (box_size + spacing),
                            start_pos.y + y as f32 * (box_size + spacing),
                        ),
                        Vec2::splat(box_size),
                    );

                    let cell_color = if cell.is_alive() {
                        age_color(cell)
                    } else {
                        self.dead_color
                    };

                    painter.rect_filled(rect, 0.0, cell_color);
                    painter.rect_stroke(rect, 0.0, Stroke::new(0.2, Color32::from_gray(160)));
                }

                // Toggle only when paused
                if paused && response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let col = ((pos.x - start_pos.x) / (box_size + spacing)).floor();
                        let row = ((pos.y - start_pos.y) / (box_size + spacing)).floor();
                        if col >= 0.0 && row >= 0.0 {
                            clicked = Some((col as usize, row as usize));
                        }
                    }
                }
            });

            if let Some((x, y)) = clicked {
                if x < width && y < height {
                    if let Err(err) = self.controller.toggle(x, y) {
                        tracing::warn!(error = %err, "toggle failed");
                    }
                }
            }
        });

        // Keep ticking while running
        if !self.controller.is_paused() {
            ctx.request_repaint_after(until_next);
        }
    }
}
