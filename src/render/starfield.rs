//! Scrolling starfield background
//!
//! Purely cosmetic, so it uses `js_sys::Math::random()` rather than the
//! seeded simulation RNG.

const STAR_COUNT: usize = 100;

struct Star {
    x: f64,
    y: f64,
    size: f64,
    /// Fall speed in px/s
    speed: f64,
}

pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(width: f64, height: f64) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: js_sys::Math::random() * width,
                y: js_sys::Math::random() * height,
                size: js_sys::Math::random() * 2.0 + 1.0,
                speed: js_sys::Math::random() * 180.0 + 30.0,
            })
            .collect();
        Self { stars }
    }

    /// Scroll stars downward, wrapping to the top with a fresh column
    pub fn advance(&mut self, dt: f64, width: f64, height: f64) {
        for star in &mut self.stars {
            star.y += star.speed * dt;
            if star.y > height {
                star.y = 0.0;
                star.x = js_sys::Math::random() * width;
            }
        }
    }

    /// Draw every star with a random twinkle alpha
    pub fn draw(&self, ctx: &web_sys::CanvasRenderingContext2d, color: &str) {
        ctx.set_fill_style_str(color);
        for star in &self.stars {
            ctx.set_global_alpha(js_sys::Math::random() * 0.5 + 0.5);
            ctx.begin_path();
            let _ = ctx.arc(star.x, star.y, star.size, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
    }
}
