//! Headless demo: renders a few frames of a small scene into an offscreen
//! target and logs the per-frame counters.

use std::time::Duration;

use anyhow::Result;

use ember_engine::assets::TextureData;
use ember_engine::frame::{FrameConfig, FrameDriver};
use ember_engine::fx::{Emitter, EmitterConfig};
use ember_engine::gpu::{Gpu, GpuBackend, GpuInit, RenderTarget};
use ember_engine::logging::{init_logging, LoggingConfig};
use ember_engine::render::{Camera2D, Layer, Source};
use ember_ui::prelude::*;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const FRAMES: u32 = 5;

/// Inverts the sampled color, keeping premultiplied alpha valid.
const INVERT_FS: &str = r#"
@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let c = textureSample(t_color, s_color, in.uv) * in.color;
    return vec4<f32>(c.a - c.r, c.a - c.g, c.a - c.b, c.a);
}
"#;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let gpu = Gpu::headless_blocking(GpuInit::default())?;
    let target = gpu.create_target(WIDTH, HEIGHT);

    let mut backend = GpuBackend::new();
    let checker = backend.load_texture(
        "checker",
        TextureData::checkerboard(64, 64, 8, Color::white(), Color::from_srgb_u8(90, 90, 110, 255)),
    );
    let invert = backend.load_shader("invert", INVERT_FS);
    let font = match load_font() {
        Some(bytes) => Some(backend.load_font("body", &bytes)?),
        None => {
            log::warn!("no system font found; labels are skipped");
            None
        }
    };

    let mut driver = FrameDriver::new(FrameConfig {
        fixed_step: Some(Duration::from_millis(16)),
        ..FrameConfig::default()
    });
    let mut sparks = Emitter::new(EmitterConfig {
        position: Vec2::new(0.0, 0.0),
        rate: 120.0,
        color: Color::from_straight(1.0, 0.6, 0.2, 1.0),
        layer: Layer::new(3.0),
        ..EmitterConfig::default()
    });

    let viewport = Vec2::new(WIDTH as f32, HEIGHT as f32);

    for _ in 0..FRAMES {
        let player = Vec2::new(driver.frame_index() as f32 * 12.0, 0.0);
        let camera = Camera2D::centered_on(player, viewport);
        sparks.set_position(player);

        let hud = Hud::new(font, driver.frame_index() as f32 / FRAMES as f32);

        let stats = driver.run_frame(&mut backend, &camera, |q, time| {
            sparks.update(time.dt);

            // Ground tiles, drawn in enqueue order but sorted under the player.
            for i in -4..=4 {
                let tile = Rect::new(i as f32 * 64.0 - 32.0, 40.0, 64.0, 64.0);
                q.draw_texture(
                    checker,
                    Rect::new(0.0, 0.0, 64.0, 64.0),
                    tile,
                    Vec2::zero(),
                    0.0,
                    Color::white(),
                    Source::Entity,
                    1.0,
                );
            }

            // Player sprite, mirrored horizontally, in an inverted-color scope.
            q.shader_mode(invert, Source::Entity, 2.0, |q| {
                q.draw_texture(
                    checker,
                    Rect::new(0.0, 0.0, -32.0, 32.0),
                    Rect::new(player.x, player.y, 32.0, 32.0),
                    Vec2::new(16.0, 16.0),
                    time.frame_index as f32 * 10.0,
                    Color::white(),
                    Source::Entity,
                    0.0,
                );
                q.draw_rectangle_lines(
                    Rect::new(player.x - 18.0, player.y - 18.0, 36.0, 36.0),
                    1.0,
                    Color::white(),
                    Source::Entity,
                    0.0,
                );
            });

            sparks.draw(q);

            let mut painter = Painter::new(q, 10.0);
            hud.paint(&mut painter, Rect::new(16.0, 16.0, 220.0, 64.0));
        });

        let mut encoder = gpu.create_encoder();
        {
            let ctx = gpu.render_ctx(&target, 1.0);
            let mut frame = RenderTarget::new(&mut encoder, &target.view);
            backend.render(&ctx, &mut frame);
        }
        gpu.submit(encoder);

        log::info!(
            "frame {}: {} draws ({} entity, {} ui), {} particles",
            driver.frame_index() - 1,
            stats.total,
            stats.entity,
            stats.ui,
            sparks.particles().len()
        );
    }

    Ok(())
}

/// Title and a progress bar inside a bordered panel.
struct Hud {
    frame: Panel,
    title: Option<Label>,
    bar: ClipArea,
}

impl Hud {
    fn new(font: Option<FontId>, progress: f32) -> Self {
        Self {
            frame: Panel::new()
                .background(Color::from_straight(0.08, 0.08, 0.12, 0.85))
                .border(1.0, Color::from_straight(0.35, 0.35, 0.45, 1.0)),
            title: font.map(|font| Label::new("EMBER", font, 18.0, Color::white()).spacing(2.0)),
            bar: ClipArea::new(ProgressBar::new().value(progress)),
        }
    }
}

impl Widget for Hud {
    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        self.frame.paint(painter, rect);

        let inner = rect.inset(8.0);
        let half = inner.size.y * 0.5;
        if let Some(title) = &self.title {
            title.paint(painter, Rect::new(inner.origin.x, inner.origin.y, inner.size.x, half));
        }
        self.bar.paint(painter, Rect::new(inner.origin.x, inner.origin.y + half + 4.0, inner.size.x, 8.0));
    }
}

fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}
