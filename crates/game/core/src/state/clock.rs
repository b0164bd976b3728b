use crate::config::GameConfig;

/// Day/weather clock.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldClock {
    /// Time of day in `[0, DAY_LENGTH)`.
    pub time: u32,
    /// Rain intensity in `[0, 1]`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rain: f32,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldClock {
    pub fn new() -> Self {
        Self::at(GameConfig::DAWN)
    }

    pub fn at(time: u32) -> Self {
        let mut clock = Self {
            time: time % GameConfig::DAY_LENGTH,
            rain: 0.0,
        };
        clock.rain = clock.rain_for_time();
        clock
    }

    fn rain_for_time(&self) -> f32 {
        if self.time > GameConfig::RAIN_START {
            ((self.time - GameConfig::RAIN_START) as f32 / GameConfig::RAIN_RAMP).min(1.0)
        } else {
            0.0
        }
    }

    /// Advances one tick; returns true when a clock event is due.
    pub fn advance(&mut self) -> bool {
        self.time = (self.time + 1) % GameConfig::DAY_LENGTH;
        self.rain = self.rain_for_time();
        self.time % GameConfig::CLOCK_EVENT_INTERVAL == 0
    }

    pub fn is_night(&self) -> bool {
        self.time > GameConfig::NIGHT_START && self.time < GameConfig::NIGHT_END
    }

    pub fn is_heavy_rain(&self) -> bool {
        self.rain > GameConfig::HEAVY_RAIN
    }

    pub fn is_raining(&self) -> bool {
        self.rain > 0.2
    }

    /// Villagers head home in these conditions.
    pub fn shelter_weather(&self) -> bool {
        self.is_night() || self.is_heavy_rain()
    }

    pub fn regen_due(&self) -> bool {
        self.time % GameConfig::REGEN_INTERVAL == 0
    }
}
