//! Overlay rendering functions.
//!
//! Layout: a title line, two side-by-side columns (own Pokémon left, rival
//! right), and a footer.

use eframe::egui::{self, Color32, RichText, Vec2};

use super::icons::TypeIcons;
use super::state::{OverlayState, SideView, TrackerStatus};
use crate::tracker::Side;

pub const BACKGROUND: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x1e);
const TITLE_COLOR: Color32 = Color32::from_rgb(0x00, 0xff, 0xcc);
const FOOTER_COLOR: Color32 = Color32::from_gray(0x99);
const ERROR_COLOR: Color32 = Color32::from_rgb(0xff, 0x88, 0x44);

/// The three icon rows under each name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectRow {
    WeakTo,
    Resists,
    Immune,
}

impl EffectRow {
    pub const ALL: [EffectRow; 3] = [EffectRow::WeakTo, EffectRow::Resists, EffectRow::Immune];

    pub fn label(&self) -> &'static str {
        match self {
            EffectRow::WeakTo => "Weak to",
            EffectRow::Resists => "Resists",
            EffectRow::Immune => "Immune",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            EffectRow::WeakTo => Color32::from_rgb(0xff, 0x44, 0x44),
            EffectRow::Resists => Color32::from_rgb(0x44, 0xff, 0x44),
            EffectRow::Immune => Color32::from_rgb(0x44, 0xff, 0xff),
        }
    }

    pub fn types<'a>(&self, view: &'a SideView) -> &'a [String] {
        match self {
            EffectRow::WeakTo => &view.weak_to,
            EffectRow::Resists => &view.resists,
            EffectRow::Immune => &view.immune_to,
        }
    }
}

/// Render the whole overlay.
pub fn render_overlay(ui: &mut egui::Ui, state: &OverlayState, icons: &TypeIcons) {
    ui.label(
        RichText::new("PokeMMO PVP Helper")
            .size(16.0)
            .strong()
            .color(TITLE_COLOR),
    );
    ui.add_space(6.0);

    ui.columns(2, |columns| {
        for (column, side) in columns.iter_mut().zip(Side::ALL) {
            render_side(column, state.side(side), icons);
        }
    });

    ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
        let color = match state.status {
            TrackerStatus::Error(_) => ERROR_COLOR,
            _ => FOOTER_COLOR,
        };
        ui.label(RichText::new(state.footer_text()).size(11.0).color(color));
    });
}

/// Render one column: name label and the three icon rows.
fn render_side(ui: &mut egui::Ui, view: &SideView, icons: &TypeIcons) {
    ui.label(
        RichText::new(&view.name)
            .size(14.0)
            .strong()
            .color(Color32::WHITE),
    );
    ui.add_space(4.0);

    for row in EffectRow::ALL {
        ui.label(RichText::new(row.label()).size(12.0).color(row.color()));
        render_icon_row(ui, row.types(view), icons);
        ui.add_space(2.0);
    }
}

fn render_icon_row(ui: &mut egui::Ui, types: &[String], icons: &TypeIcons) {
    let size = Vec2::splat(icons.size());

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        // Keeps the row height stable when there is nothing to show
        ui.allocate_exact_size(Vec2::new(0.0, size.y), egui::Sense::hover());

        for type_name in types {
            if let Some(texture) = icons.get(type_name) {
                ui.image((texture.id(), size)).on_hover_text(type_name);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_read_matching_lists() {
        let view = SideView {
            name: "Gengar".to_string(),
            weak_to: vec!["Dark".to_string()],
            resists: vec!["Bug".to_string()],
            immune_to: vec!["Normal".to_string()],
        };
        let picked: Vec<&[String]> = EffectRow::ALL.iter().map(|r| r.types(&view)).collect();
        assert_eq!(picked[0], ["Dark".to_string()]);
        assert_eq!(picked[1], ["Bug".to_string()]);
        assert_eq!(picked[2], ["Normal".to_string()]);
    }

    #[test]
    fn test_row_labels_and_colors() {
        assert_eq!(EffectRow::WeakTo.label(), "Weak to");
        assert_eq!(EffectRow::Immune.color(), Color32::from_rgb(0x44, 0xff, 0xff));
    }

    #[test]
    fn test_title_is_teal() {
        assert_eq!(TITLE_COLOR, Color32::from_rgb(0x00, 0xff, 0xcc));
    }
}
