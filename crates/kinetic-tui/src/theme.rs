use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey0: Color,
    pub grey2: Color,

    // Semantic colors
    pub accent: Color,
    pub idle: Color,
    pub dragging: Color,
    pub flinging: Color,

    /// Page backgrounds, cycled by page index
    pub pages: Vec<Color>,
}

impl Theme {
    /// Background for page `index`
    pub fn page_color(&self, index: usize) -> Color {
        if self.pages.is_empty() {
            return self.bg1;
        }
        self.pages[index % self.pages.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            idle: Color::Rgb(0xa9, 0xb6, 0x65),
            dragging: Color::Rgb(0xe7, 0x8a, 0x4e),
            flinging: Color::Rgb(0x7d, 0xae, 0xa3),
            pages: vec![
                Color::Rgb(0x4c, 0x3a, 0x3a),
                Color::Rgb(0x4a, 0x42, 0x32),
                Color::Rgb(0x3b, 0x44, 0x39),
                Color::Rgb(0x36, 0x41, 0x45),
                Color::Rgb(0x44, 0x3a, 0x47),
                Color::Rgb(0x45, 0x40, 0x3d),
            ],
        }
    }
}
