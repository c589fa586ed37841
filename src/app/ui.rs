use super::theme;
use super::{ImageUploader, Screen};
use crate::config::ACCEPTED_EXTENSIONS;
use crate::utils::{human_size, truncate_display_name};
use eframe::egui::load::SizedTexture;
use eframe::egui::{self, Align, Layout, RichText, Stroke};
use rfd::FileDialog;

const THUMBNAIL_SIZE: f32 = 48.0;

enum CapsuleAction {
    Delete(usize),
    Preview(usize),
}

impl ImageUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Image Uploader");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.selectable_value(&mut self.state.screen, Screen::SignUp, "Sign Up");
                    ui.selectable_value(&mut self.state.screen, Screen::Upload, "Upload");
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.screen {
            Screen::Upload => self.render_upload_page(ui),
            Screen::SignUp => self.state.sign_up.render(ui),
        });

        if self.state.screen == Screen::Upload {
            self.render_preview_window(ctx);
        }
    }

    fn render_upload_page(&mut self, ui: &mut egui::Ui) {
        self.render_notice(ui);

        ui.columns(2, |columns| {
            self.render_drop_zone(&mut columns[0]);
            self.render_uploads(&mut columns[1]);
        });
    }

    fn render_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.manager.notice() else {
            return;
        };
        let color = if notice.is_error() {
            theme::ERROR
        } else {
            theme::SUCCESS
        };
        let message = notice.message();
        let detail = notice.detail().map(str::to_string);

        let mut dismissed = false;
        egui::Frame::group(ui.style())
            .stroke(Stroke::new(1.0, color))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.colored_label(color, message);
                        if let Some(detail) = detail {
                            ui.label(RichText::new(detail).small().weak());
                        }
                    });
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        dismissed = ui.small_button("✖").clicked();
                    });
                });
            });
        if dismissed {
            self.manager.dismiss_notice();
        }
        ui.add_space(10.0);
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.manager.is_uploading();
        let (fill, stroke) = if self.manager.drag_active() {
            (theme::DROP_ACTIVE_FILL, Stroke::new(4.0, theme::DROP_ACTIVE_STROKE))
        } else {
            (ui.visuals().extreme_bg_color, Stroke::new(1.0, theme::BORDER))
        };

        egui::Frame::none()
            .fill(fill)
            .stroke(stroke)
            .rounding(24.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_min_height(346.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.label(RichText::new("⬆").size(48.0).color(theme::ACCENT));
                    ui.add_space(16.0);
                    ui.label(
                        RichText::new("Drag & drop files to upload")
                            .strong()
                            .color(theme::TEXT),
                    );
                    ui.label(RichText::new("or").color(theme::TEXT));
                    ui.add_space(8.0);

                    ui.add_enabled_ui(enabled, |ui| {
                        let browse_label =
                            RichText::new("Browse files...").color(egui::Color32::WHITE);
                        let browse = egui::Button::new(browse_label)
                            .fill(theme::ACCENT)
                            .rounding(20.0)
                            .min_size(egui::vec2(138.0, 39.0));
                        if ui.add(browse).clicked() {
                            if let Some(paths) = FileDialog::new()
                                .add_filter("Images", ACCEPTED_EXTENSIONS)
                                .pick_files()
                            {
                                self.on_files_picked(paths);
                            }
                        }

                        ui.add_space(4.0);
                        if ui.link("Add a whole folder").clicked() {
                            if let Some(folder) = FileDialog::new().pick_folder() {
                                self.on_folder_picked(&folder);
                            }
                        }
                    });
                });
            });
    }

    fn render_uploads(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Your Uploads").size(26.0).strong().color(theme::TEXT));
        ui.add_space(12.0);

        let ctx = ui.ctx().clone();
        let locked = self.manager.is_uploading();
        let max_len = self.config.display_name_len;
        let mut action = None;

        egui::ScrollArea::vertical()
            .max_height(273.0)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.manager.batch().is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(110.0);
                        ui.label(
                            RichText::new("There are no files to preview...")
                                .italics()
                                .weak(),
                        );
                    });
                    return;
                }

                for (index, file) in self.manager.files_mut().enumerate() {
                    egui::Frame::group(ui.style())
                        .stroke(Stroke::new(1.0, theme::BORDER))
                        .rounding(12.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                let thumb = match file.preview(&ctx) {
                                    Some(texture) => {
                                        let size = fit(texture.size_vec2(), THUMBNAIL_SIZE);
                                        ui.add(
                                            egui::Image::new(SizedTexture::new(texture.id(), size))
                                                .sense(egui::Sense::click()),
                                        )
                                    }
                                    None => {
                                        let icon = RichText::new("🖼").size(THUMBNAIL_SIZE * 0.6);
                                        ui.add(egui::Label::new(icon).sense(egui::Sense::click()))
                                    }
                                };
                                if thumb.on_hover_text("Show preview").clicked() {
                                    action = Some(CapsuleAction::Preview(index));
                                }

                                ui.vertical(|ui| {
                                    ui.label(truncate_display_name(file.name(), max_len))
                                        .on_hover_text(file.name());
                                    ui.label(RichText::new(human_size(file.size())).small().weak());
                                });

                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                    let delete = ui.add_enabled(
                                        !locked,
                                        egui::Button::new("🗑").frame(false),
                                    );
                                    if delete.on_hover_text("Remove").clicked() {
                                        action = Some(CapsuleAction::Delete(index));
                                    }
                                });
                            });
                        });
                    ui.add_space(6.0);
                }
            });

        match action {
            Some(CapsuleAction::Delete(index)) => self.on_delete(index),
            Some(CapsuleAction::Preview(index)) => self.state.preview_open = Some(index),
            None => {}
        }

        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            let ready = !self.manager.batch().is_empty() && !locked;
            let (label, fill) = if locked {
                ("Uploading Files...", theme::ACCENT_MUTED)
            } else if ready {
                ("Upload Files", theme::ACCENT)
            } else {
                ("Upload Files", theme::ACCENT_MUTED)
            };
            let text = RichText::new(label).strong().color(egui::Color32::WHITE);
            let button = egui::Button::new(text)
                .fill(fill)
                .rounding(25.0)
                .min_size(egui::vec2(338.0, 51.0));

            if ui.add_enabled(!locked, button).clicked() {
                self.on_submit(&ctx);
            }
            if locked {
                ui.add_space(6.0);
                ui.spinner();
            }
        });
    }

    fn render_preview_window(&mut self, ctx: &egui::Context) {
        let Some(index) = self.state.preview_open else {
            return;
        };
        let Some(file) = self.manager.files_mut().nth(index) else {
            self.state.preview_open = None;
            return;
        };

        let mut open = true;
        let title = file.name().to_string();
        egui::Window::new(title)
            .id(egui::Id::new("image-preview"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                match file.preview(ctx) {
                    Some(texture) => {
                        let size = fit(texture.size_vec2(), 480.0);
                        ui.image(SizedTexture::new(texture.id(), size));
                    }
                    None => {
                        ui.label("No preview available for this file.");
                    }
                }
                ui.label(format!("{} · {}", file.mime(), human_size(file.size())));
                if let Some(path) = file.source() {
                    if ui.button("Open in default viewer").clicked() {
                        if let Err(e) = open::that(path) {
                            tracing::warn!("Failed to open {}: {}", path.display(), e);
                        }
                    }
                }
            });

        if !open {
            self.state.preview_open = None;
        }
    }
}

/// Scales `size` down so its longest edge is at most `max_edge`.
fn fit(size: egui::Vec2, max_edge: f32) -> egui::Vec2 {
    let longest = size.x.max(size.y);
    if longest <= max_edge || longest <= 0.0 {
        size
    } else {
        size * (max_edge / longest)
    }
}
