//! Screen - background plus both registries, and the per-frame render pass.

use std::path::PathBuf;

use tracing::{info, warn};

use super::background::Background;
use crate::backend::{FontEngine, ImageDecoder, RenderContext};
use crate::config::ScreenConfig;
use crate::engine::{RoundRegistry, SequenceRegistry};
use crate::error::SequenceError;
use crate::types::Color;

/// What [`Screen::build`] managed to set up.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub sequences: usize,
    pub rounds: usize,
    /// Font path picked from the candidates, if any loaded.
    pub font: Option<PathBuf>,
    /// Every failure along the way. None of them stop the build.
    pub errors: Vec<SequenceError>,
}

/// Everything drawn each frame.
///
/// `T` is the render context's texture type, `F` the font engine's font.
#[derive(Debug)]
pub struct Screen<T, F> {
    pub background: Option<Background<T>>,
    pub sequences: SequenceRegistry<T, F>,
    pub rounds: RoundRegistry<F>,
}

impl<T, F> Screen<T, F> {
    pub fn new() -> Self {
        Self {
            background: None,
            sequences: SequenceRegistry::new(),
            rounds: RoundRegistry::new(),
        }
    }

    /// Reset to an empty screen.
    pub fn init(&mut self) {
        self.background = None;
        self.sequences.init();
        self.rounds.init();
    }

    /// Build the screen described by a layout.
    ///
    /// Entities are created in file order. A failed create, image or
    /// background load is recorded in the report and skipped; the rest of
    /// the layout is still built.
    pub fn build<R, D, E>(
        &mut self,
        config: &ScreenConfig,
        ctx: &mut R,
        images: &D,
        fonts: &E,
        now_ms: u64,
    ) -> BuildReport
    where
        R: RenderContext<Texture = T>,
        D: ImageDecoder,
        E: FontEngine<Font = F>,
    {
        self.init();
        self.sequences.set_blink_interval_ms(config.input.blink_interval_ms);
        self.sequences.set_edit_unit(config.input.edit_unit);

        let mut report = BuildReport::default();

        if let Some(path) = &config.background {
            match Background::load(ctx, images, path) {
                Ok(bg) => self.background = Some(bg),
                Err(e) => report.errors.push(e),
            }
        }

        for spec in &config.sequences {
            let index = match self.sequences.create(spec) {
                Ok(index) => index,
                Err(e) => {
                    report.errors.push(e);
                    continue;
                }
            };
            report.sequences += 1;

            let Some(seq) = self.sequences.get_mut(index) else {
                continue;
            };
            if let Some(path) = &spec.image {
                if let Err(e) = seq.load_image(ctx, images, path) {
                    report.errors.push(e);
                }
            }
            if let Some(input) = &spec.input {
                seq.enable_input(&input.placeholder, now_ms);
            }
        }

        for spec in &config.rounds {
            match self.rounds.create(spec) {
                Ok(_) => report.rounds += 1,
                Err(e) => report.errors.push(e),
            }
        }

        report.font = self.load_fonts(fonts, &config.fonts);
        info!(
            "Screen built: {} sequences, {} round sequences, {} problems",
            report.sequences,
            report.rounds,
            report.errors.len()
        );
        report
    }

    /// Try font files in order until one loads for at least one sequence,
    /// then give the same font to the round sequences.
    pub fn load_fonts<E>(&mut self, fonts: &E, candidates: &[PathBuf]) -> Option<PathBuf>
    where
        E: FontEngine<Font = F>,
    {
        for path in candidates {
            if self.sequences.load_font_for_all(fonts, path) > 0 {
                info!("Using font: {}", path.display());
                self.rounds.load_font_for_all(fonts, path);
                return Some(path.clone());
            }
        }
        warn!("No usable font found - text will not be displayed");
        None
    }

    /// Draw one frame: clear to black, background, rectangles, circles,
    /// present.
    pub fn render_frame<R, E>(&self, ctx: &mut R, fonts: &E)
    where
        R: RenderContext<Texture = T>,
        E: FontEngine<Font = F>,
    {
        ctx.clear(Color::BLACK);
        if let Some(bg) = &self.background {
            bg.draw(ctx);
        }
        self.sequences.draw_all(ctx, fonts);
        self.rounds.draw_all(ctx, fonts);
        ctx.present();
    }

    /// Release every texture and font.
    pub fn teardown(&mut self) {
        if self.background.take().is_some() {
            info!("Background texture destroyed");
        }
        self.sequences.teardown();
        self.rounds.teardown();
    }
}

impl<T, F> Default for Screen<T, F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Canvas;
    use crate::engine::{RoundSpec, SequenceSpec};
    use crate::error::Result;
    use crate::types::{Rect, Surface};
    use std::path::Path;

    struct Fonts;

    impl FontEngine for Fonts {
        type Font = ();

        fn open(&self, path: &Path, _size: u32) -> Result<()> {
            if path.ends_with("good.ttf") {
                Ok(())
            } else {
                Err(SequenceError::FontLoadFailed {
                    path: path.to_path_buf(),
                    reason: "missing".into(),
                })
            }
        }

        fn render_text(&self, _font: &(), _text: &str, _color: Color) -> Option<Surface> {
            None
        }

        fn measure_text(&self, _font: &(), _text: &str) -> (u32, u32) {
            (0, 0)
        }
    }

    struct Images;

    impl ImageDecoder for Images {
        fn decode(&self, path: &Path) -> Result<Surface> {
            if path.ends_with("bg.png") {
                Ok(Surface::new(2, 2, Color::rgb(0, 0, 200)))
            } else {
                Err(SequenceError::DecodeFailed {
                    path: path.to_path_buf(),
                    reason: "missing".into(),
                })
            }
        }
    }

    fn config() -> ScreenConfig {
        ScreenConfig {
            background: Some("bg.png".into()),
            fonts: vec!["bad.ttf".into(), "good.ttf".into()],
            sequences: vec![
                SequenceSpec::new(1, "panel", Rect::new(4, 4, 4, 4), Color::rgb(200, 0, 0)).with_text("A"),
                SequenceSpec::new(1, "dupe", Rect::default(), Color::BLACK),
                SequenceSpec::new(2, "picture", Rect::new(12, 0, 2, 2), Color::BLACK).with_image("gone.png"),
                SequenceSpec::new(3, "field", Rect::new(0, 8, 8, 4), Color::BLACK).with_input("Name"),
            ],
            rounds: vec![RoundSpec::new(100, "volume_indicator", (12, 12), 2, Color::rgb(0, 200, 0)).with_text("32")],
            ..ScreenConfig::default()
        }
    }

    #[test]
    fn test_build_continues_past_failures() {
        let mut canvas = Canvas::new(16, 16);
        let mut screen: Screen<Surface, ()> = Screen::new();
        let report = screen.build(&config(), &mut canvas, &Images, &Fonts, 0);

        assert_eq!(report.sequences, 3);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.font, Some(PathBuf::from("good.ttf")));
        // duplicate id + missing image
        assert_eq!(report.errors.len(), 2);

        assert!(screen.background.is_some());
        assert!(screen.sequences.find_by_id(3).unwrap().is_input());
        assert!(screen.sequences.find_by_id(1).unwrap().font().is_some());
        assert!(screen.rounds.find_by_id(100).unwrap().font().is_some());
    }

    #[test]
    fn test_render_frame_order() {
        let mut canvas = Canvas::new(16, 16);
        let mut screen: Screen<Surface, ()> = Screen::new();
        screen.build(&config(), &mut canvas, &Images, &Fonts, 0);
        screen.render_frame(&mut canvas, &Fonts);

        assert_eq!(canvas.frames(), 1);
        // background at its own size
        assert_eq!(canvas.pixel(1, 1), Some(Color::rgb(0, 0, 200)));
        assert_eq!(canvas.pixel(2, 2), Some(Color::BLACK));
        // rect fill over the cleared frame
        assert_eq!(canvas.pixel(5, 5), Some(Color::rgb(200, 0, 0)));
        // circle drawn last
        assert_eq!(canvas.pixel(12, 12), Some(Color::rgb(0, 200, 0)));
    }

    #[test]
    fn test_teardown_empties_everything() {
        let mut canvas = Canvas::new(16, 16);
        let mut screen: Screen<Surface, ()> = Screen::new();
        screen.build(&config(), &mut canvas, &Images, &Fonts, 0);
        screen.teardown();
        assert!(screen.background.is_none());
        assert!(screen.sequences.is_empty());
        assert!(screen.rounds.is_empty());
    }

    #[test]
    fn test_no_font_found() {
        let mut screen: Screen<Surface, ()> = Screen::new();
        screen.sequences.create(&SequenceSpec::new(1, "a", Rect::default(), Color::BLACK).with_text("x")).unwrap();
        assert_eq!(screen.load_fonts(&Fonts, &["nope.ttf".into()]), None);
    }
}
