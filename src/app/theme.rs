use eframe::egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(0x38, 0x7e, 0xed);
pub const ACCENT_MUTED: Color32 = Color32::from_rgb(0x8e, 0xba, 0xff);
pub const DROP_ACTIVE_FILL: Color32 = Color32::from_rgb(0xd9, 0xe7, 0xff);
pub const DROP_ACTIVE_STROKE: Color32 = Color32::from_rgb(0xa1, 0xc5, 0xfe);
pub const TEXT: Color32 = Color32::from_rgb(0x4c, 0x4c, 0x4c);
pub const BORDER: Color32 = Color32::from_rgb(0xd2, 0xd2, 0xd2);
pub const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
pub const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
pub const GOOGLE_BLUE: Color32 = Color32::from_rgb(0x42, 0x85, 0xf4);
