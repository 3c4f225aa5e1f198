use rand::Rng;
use serde::Serialize;

/// HSV color of a player's button. Components are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonColor {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl ButtonColor {
    const MIN_VALUE: f32 = 0.5;

    /// Bright, fully saturated color with a random hue.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        ButtonColor {
            hue: rng.gen_range(0.0..=1.0),
            saturation: 1.0,
            value: rng.gen_range(ButtonColor::MIN_VALUE..=1.0),
        }
    }

    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = (self.hue * 6.0) % 6.0;
        let sector = h.floor();
        let fraction = h - sector;
        let v = self.value;
        let p = v * (1.0 - self.saturation);
        let q = v * (1.0 - self.saturation * fraction);
        let t = v * (1.0 - self.saturation * (1.0 - fraction));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        (to_channel(r), to_channel(g), to_channel(b))
    }

    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

fn to_channel(component: f32) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}
