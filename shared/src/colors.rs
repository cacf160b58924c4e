use crate::emotion::{Dominant, EmotionVector};

/// Flat gray used when neutral dominates (or nothing does).
pub const NEUTRAL_GRAY: (u8, u8, u8) = (229, 231, 235);

/// Map an emotion vector to its fill color.
///
/// Red scale when fear or sadness holds the maximum (darker the stronger the
/// combined distress), green scale when joy wins outright, flat gray for
/// neutral. Tie precedence is fear/sadness > joy > neutral — see
/// [`EmotionVector::dominant`]. Pure: no state, identical input gives
/// identical output.
pub fn emotion_color(emotions: &EmotionVector) -> (u8, u8, u8) {
    match emotions.dominant() {
        Dominant::Distress => {
            let intensity = 200.0 - (emotions.fear + emotions.sadness) * 100.0;
            scale_rgb(intensity, intensity * 0.3, intensity * 0.3)
        }
        Dominant::Joy => {
            let intensity = 200.0 - emotions.joy * 100.0;
            scale_rgb(intensity * 0.3, intensity, intensity * 0.3)
        }
        Dominant::Neutral => NEUTRAL_GRAY,
    }
}

/// Floor each channel, then clamp to the displayable range. Vectors are
/// conceptually in [0,1] but arrive unvalidated; clamping keeps out-of-range
/// input from wrapping.
fn scale_rgb(r: f64, g: f64, b: f64) -> (u8, u8, u8) {
    (channel(r), channel(g), channel(b))
}

fn channel(value: f64) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}

/// Format RGB as a CSS color string.
pub fn rgb_css(r: u8, g: u8, b: u8) -> String {
    format!("rgb({r},{g},{b})")
}

/// Format RGBA as a CSS color string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}
