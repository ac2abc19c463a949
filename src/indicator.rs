//! Status pixel - one WS2812 showing whether the emulation is enabled.
//!
//! Every color passes through a global brightness scale before it is
//! pushed; a full-green 255 would be blinding on a desk.

use smart_leds::{SmartLedsWrite, RGB8};

use crate::config::IndicatorConfig;
use crate::error::Error;

/// Scale each channel by `brightness / 255` (truncating).
pub fn scale(color: RGB8, brightness: u8) -> RGB8 {
    let ch = |c: u8| ((u16::from(c) * u16::from(brightness)) / 255) as u8;
    RGB8::new(ch(color.r), ch(color.g), ch(color.b))
}

pub struct Indicator<W> {
    led: W,
    config: IndicatorConfig,
}

impl<W> Indicator<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub fn new(led: W, config: IndicatorConfig) -> Self {
        Self { led, config }
    }

    /// Push one color.  `None` uses the configured brightness.
    pub fn set_color(&mut self, color: RGB8, brightness: Option<u8>) {
        if let Err(e) = self.push(color, brightness) {
            warn!("LED: {:?}", e);
        }
    }

    /// Like [`set_color`](Self::set_color), but hands the driver failure
    /// back instead of logging it.
    pub fn push(&mut self, color: RGB8, brightness: Option<u8>) -> Result<(), Error> {
        let pixel = scale(color, brightness.unwrap_or(self.config.brightness));
        self.led.write([pixel]).map_err(|_| Error::Led)
    }

    /// Enabled color when enabled, dark when disabled.
    pub fn show_state(&mut self, enabled: bool) {
        if enabled {
            let (r, g, b) = self.config.enabled_rgb;
            self.set_color(RGB8::new(r, g, b), None);
        } else {
            self.off();
        }
    }

    pub fn off(&mut self) {
        self.set_color(RGB8::default(), None);
    }
}
