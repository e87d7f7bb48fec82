use std::sync::Arc;

use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2, Visuals,
};
use oradoku_core::Position;
use oradoku_game::CellState;

use crate::action::{Action, ActionRequestQueue};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct GridVisualState: u8 {
        const SELECTED = 0b0000_0001;
        const SAME_DIGIT = 0b0000_0010;
        const HOUSE_SELECTED = 0b0000_0100;
        const CONFLICT = 0b0000_1000;
        const HINT_FLASH = 0b0001_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GridCell {
    pub(crate) content: CellState,
    pub(crate) visual_state: GridVisualState,
}

#[derive(Debug, Clone)]
pub(crate) struct GridViewModel {
    cells: [GridCell; 81],
}

impl GridViewModel {
    #[must_use]
    pub(crate) fn new(cells: [GridCell; 81]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub(crate) fn cell(&self, pos: Position) -> &GridCell {
        &self.cells[pos.index()]
    }
}

struct GridPalette {
    border_inactive: Color32,
    border_selected: Color32,
    border_conflict: Color32,
    text_given: Color32,
    text_filled: Color32,
    text_conflict: Color32,
    cell_bg_default: Color32,
    cell_bg_selected: Color32,
    cell_bg_same_digit: Color32,
    cell_bg_house: Color32,
    cell_bg_hint: Color32,
}

impl GridPalette {
    fn from_visuals(visuals: &Visuals) -> Self {
        Self {
            border_inactive: visuals.widgets.inactive.fg_stroke.color,
            border_selected: visuals.selection.stroke.color,
            border_conflict: visuals.error_fg_color,
            text_given: visuals.strong_text_color(),
            text_filled: visuals.text_color(),
            text_conflict: visuals.error_fg_color,
            cell_bg_default: visuals.extreme_bg_color,
            cell_bg_selected: visuals.selection.bg_fill,
            cell_bg_same_digit: visuals.selection.bg_fill.gamma_multiply(0.5),
            cell_bg_house: visuals.faint_bg_color,
            cell_bg_hint: visuals.warn_fg_color.gamma_multiply(0.35),
        }
    }
}

const CELL_BORDER_WIDTH_RATIO: f32 = 0.03;
const SELECTED_BORDER_WIDTH_RATIO: f32 = 3.0;

impl GridVisualState {
    fn fill_color(self, palette: &GridPalette) -> Color32 {
        if self.intersects(Self::HINT_FLASH) {
            return palette.cell_bg_hint;
        }
        if self.intersects(Self::SELECTED) {
            return palette.cell_bg_selected;
        }
        if self.intersects(Self::SAME_DIGIT) {
            return palette.cell_bg_same_digit;
        }
        if self.intersects(Self::HOUSE_SELECTED) {
            return palette.cell_bg_house;
        }
        palette.cell_bg_default
    }

    fn text_color(self, is_given: bool, palette: &GridPalette) -> Color32 {
        if self.intersects(Self::CONFLICT) {
            return palette.text_conflict;
        }
        if is_given {
            palette.text_given
        } else {
            palette.text_filled
        }
    }

    fn border(self, palette: &GridPalette, cell_size: f32) -> Stroke {
        let base_width = f32::max(cell_size * CELL_BORDER_WIDTH_RATIO, 1.0);
        if self.intersects(Self::CONFLICT) {
            return Stroke::new(base_width * SELECTED_BORDER_WIDTH_RATIO, palette.border_conflict);
        }
        if self.intersects(Self::SELECTED) {
            return Stroke::new(base_width * SELECTED_BORDER_WIDTH_RATIO, palette.border_selected);
        }
        Stroke::new(base_width, palette.border_inactive)
    }
}

pub(crate) fn show(ui: &mut Ui, vm: &GridViewModel, action_queue: &mut ActionRequestQueue) {
    let style = Arc::clone(ui.style());
    let visuals = &style.visuals;
    let palette = GridPalette::from_visuals(visuals);

    let grid_side = ui.available_size().min_elem();
    let (rect, _response) = ui.allocate_exact_size(Vec2::splat(grid_side), Sense::hover());

    let thick_border = f32::max(grid_side * 0.008, 2.0);
    let cell_size = (grid_side - thick_border * 4.0) / 9.0;
    let inner_rect = rect.shrink(thick_border);

    let painter = ui.painter();
    draw_outer_border(painter, rect, thick_border, palette.border_inactive);

    for y in 0..9u8 {
        for x in 0..9u8 {
            let pos = Position::new(x, y);
            let cell = vm.cell(pos);
            let vs = cell.visual_state;

            let xf = f32::from(x);
            let yf = f32::from(y);
            let cell_min = inner_rect.min
                + Vec2::new(
                    cell_size * xf + (xf / 3.0).floor() * thick_border,
                    cell_size * yf + (yf / 3.0).floor() * thick_border,
                );
            let cell_rect = Rect::from_min_max(cell_min, cell_min + Vec2::splat(cell_size));

            painter.rect_filled(cell_rect, 0.0, vs.fill_color(&palette));

            if let Some(digit) = cell.content.as_digit() {
                painter.text(
                    cell_rect.center(),
                    Align2::CENTER_CENTER,
                    digit.as_str(),
                    FontId::proportional(cell_size * 0.8),
                    vs.text_color(cell.content.is_given(), &palette),
                );
            }

            painter.rect_stroke(
                cell_rect,
                0.0,
                vs.border(&palette, cell_size),
                StrokeKind::Inside,
            );

            let response = ui.interact(cell_rect, ui.id().with((x, y)), Sense::click());
            if response.clicked() {
                action_queue.request(Action::SelectCell(pos));
            }
        }
    }

    draw_box_borders(painter, inner_rect, cell_size, thick_border, palette.border_inactive);
}

fn draw_outer_border(painter: &Painter, rect: Rect, thickness: f32, color: Color32) {
    let left = Rect::from_min_max(
        Pos2::new(rect.left(), rect.top()),
        Pos2::new(rect.left() + thickness, rect.bottom()),
    );
    let right = Rect::from_min_max(
        Pos2::new(rect.right() - thickness, rect.top()),
        Pos2::new(rect.right(), rect.bottom()),
    );
    let top = Rect::from_min_max(
        Pos2::new(rect.left(), rect.top()),
        Pos2::new(rect.right(), rect.top() + thickness),
    );
    let bottom = Rect::from_min_max(
        Pos2::new(rect.left(), rect.bottom() - thickness),
        Pos2::new(rect.right(), rect.bottom()),
    );

    painter.rect_filled(left, 0.0, color);
    painter.rect_filled(right, 0.0, color);
    painter.rect_filled(top, 0.0, color);
    painter.rect_filled(bottom, 0.0, color);
}

fn draw_box_borders(
    painter: &Painter,
    inner_rect: Rect,
    cell_size: f32,
    thickness: f32,
    color: Color32,
) {
    let start = inner_rect.min;
    let end = inner_rect.max;
    let half = thickness * 0.5;

    for i in [1.0, 2.0] {
        let offset = cell_size * 3.0 * i + thickness * (i - 0.5);
        let x = start.x + offset;
        let v_rect = Rect::from_min_max(Pos2::new(x - half, start.y), Pos2::new(x + half, end.y));
        painter.rect_filled(v_rect, 0.0, color);

        let y = start.y + offset;
        let h_rect = Rect::from_min_max(Pos2::new(start.x, y - half), Pos2::new(end.x, y + half));
        painter.rect_filled(h_rect, 0.0, color);
    }
}
