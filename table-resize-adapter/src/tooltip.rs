use table_resize::Point;

/// The live width readout shown next to the pointer while a header is dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct WidthTooltip {
    pub visible: bool,
    pub width: u32,
    /// Pointer position the tooltip is anchored to (viewport coordinates).
    pub anchor: Point,
}

impl WidthTooltip {
    /// CSS transform that centers the tooltip above its anchor.
    pub const TRANSFORM: &'static str = "translate(-50%, -120%)";

    pub fn show(&mut self, width: u32, anchor: Point) {
        self.visible = true;
        self.width = width;
        self.anchor = anchor;
    }

    pub fn update(&mut self, width: u32, anchor: Point) {
        self.width = width;
        self.anchor = anchor;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn label(&self) -> String {
        format!("{}px", self.width)
    }
}
