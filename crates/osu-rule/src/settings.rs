//! Scoring policy settings.
//!
//! `Settings` is immutable: it can only be obtained from
//! [`SettingsBuilder::build`], which validates window ordering and radii.
//! The builder also has a by-name accessor for table-driven callers;
//! unknown names are rejected.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Value accepted by the by-name setting accessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    /// Timing window or horizon, milliseconds.
    Ms(i32),
    /// Spatial radius, playfield units.
    Px(f32),
    /// Policy toggle.
    Flag(bool),
}

macro_rules! settings_fields {
    (
        ms { $($ms:ident = $ms_default:expr),* $(,)? }
        px { $($px:ident = $px_default:expr),* $(,)? }
        flag { $($flag:ident = $flag_default:expr),* $(,)? }
    ) => {
        /// Validated, immutable scoring policy record.
        ///
        /// Fields are crate-private: outside this crate a built value
        /// cannot be written to, only read through the accessors below.
        /// Field semantics follow the engine docs in [`crate::std_score`]
        /// and [`crate::mania_score`].
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct Settings {
            $(pub(crate) $ms: i32,)*
            $(pub(crate) $px: f32,)*
            $(pub(crate) $flag: bool,)*
        }

        impl Default for Settings {
            fn default() -> Self {
                Self {
                    $($ms: $ms_default,)*
                    $($px: $px_default,)*
                    $($flag: $flag_default,)*
                }
            }
        }

        impl Settings {
            $(pub fn $ms(&self) -> i32 {
                self.$ms
            })*

            $(pub fn $px(&self) -> f32 {
                self.$px
            })*

            $(pub fn $flag(&self) -> bool {
                self.$flag
            })*
        }

        /// Mutable staging area for [`Settings`].
        #[derive(Debug, Clone, PartialEq)]
        pub struct SettingsBuilder {
            $(pub $ms: i32,)*
            $(pub $px: f32,)*
            $(pub $flag: bool,)*
        }

        impl Default for SettingsBuilder {
            fn default() -> Self {
                Self {
                    $($ms: $ms_default,)*
                    $($px: $px_default,)*
                    $($flag: $flag_default,)*
                }
            }
        }

        impl SettingsBuilder {
            /// Write a setting by name. Unknown names and mismatched value
            /// kinds fail; nothing is written on error.
            pub fn set(&mut self, name: &str, value: SettingValue) -> Result<&mut Self, ConfigError> {
                $(if name == stringify!($ms) {
                    return match value {
                        SettingValue::Ms(v) => {
                            self.$ms = v;
                            Ok(self)
                        }
                        _ => Err(ConfigError::WrongValueKind(stringify!($ms))),
                    };
                })*
                $(if name == stringify!($px) {
                    return match value {
                        SettingValue::Px(v) => {
                            self.$px = v;
                            Ok(self)
                        }
                        _ => Err(ConfigError::WrongValueKind(stringify!($px))),
                    };
                })*
                $(if name == stringify!($flag) {
                    return match value {
                        SettingValue::Flag(v) => {
                            self.$flag = v;
                            Ok(self)
                        }
                        _ => Err(ConfigError::WrongValueKind(stringify!($flag))),
                    };
                })*
                Err(ConfigError::UnknownOption(name.to_string()))
            }

            fn freeze(&self) -> Settings {
                Settings {
                    $($ms: self.$ms,)*
                    $($px: self.$px,)*
                    $($flag: self.$flag,)*
                }
            }
        }
    };
}

settings_fields! {
    ms {
        // Press windows: hits in (-neg_hit_range, +pos_hit_range],
        // misses out to the *_miss_range bounds, nothing beyond.
        neg_hit_miss_range = 200,
        neg_hit_range = 100,
        pos_hit_range = 100,
        pos_hit_miss_range = 200,
        // Release windows, same shape.
        neg_rel_miss_range = 1000,
        neg_rel_range = 500,
        pos_rel_range = 500,
        pos_rel_miss_range = 1000,
        // Hold window around each slider aimpoint.
        neg_hld_range = 50,
        pos_hld_range = 1000,
        // Look-ahead horizon: how early an aimpoint becomes visible.
        ar_ms = 450,
    }
    px {
        // Cursor tolerance for presses, holds, releases.
        hitobject_radius = 36.5,
        follow_radius = 100.0,
        release_radius = 100.0,
    }
    flag {
        // Off-note taps outside any press window emit Empty records.
        blank_miss = false,
        // Mania: long-note releases are not judged.
        lazy_sliders = false,
        // Reserved: early taps do not extend the previous note's window.
        notelock = true,
        // Reserved: windows scale to neighbor spacing.
        dynamic_window = false,
        // A premature release mid-slider is forgivable until pos_hld_range.
        recoverable_release = true,
        // The cursor may leave the follow radius and return in time.
        recoverable_missaim = true,
        // Emit Miss records for presses/releases outside the hit window.
        press_miss = true,
        release_miss = true,
        // A mid-slider miss drops the remainder of the hit-object.
        miss_slider = false,
        // Whether a key transition is required per aimpoint role.
        require_tap_press = true,
        require_tap_release = true,
        require_tap_hold = true,
        // Whether spatial proximity is required per aimpoint role.
        require_aim_press = true,
        require_aim_release = true,
        require_aim_hold = true,
        // Reduced-replay pre-pass: ignore a press/release while the other
        // key is already down.
        press_block = false,
        release_block = false,
        // Reserved: hit-window overlap disambiguation.
        overlap_miss_handling = false,
        overlap_hit_handling = false,
    }
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }
}

impl SettingsBuilder {
    /// Validate and freeze into an immutable [`Settings`].
    pub fn build(&self) -> Result<Settings, ConfigError> {
        let windows = [
            ("neg_hit_miss_range", self.neg_hit_miss_range),
            ("neg_hit_range", self.neg_hit_range),
            ("pos_hit_range", self.pos_hit_range),
            ("pos_hit_miss_range", self.pos_hit_miss_range),
            ("neg_rel_miss_range", self.neg_rel_miss_range),
            ("neg_rel_range", self.neg_rel_range),
            ("pos_rel_range", self.pos_rel_range),
            ("pos_rel_miss_range", self.pos_rel_miss_range),
            ("neg_hld_range", self.neg_hld_range),
            ("pos_hld_range", self.pos_hld_range),
            ("ar_ms", self.ar_ms),
        ];
        for (name, value) in windows {
            if value < 0 {
                return Err(ConfigError::NegativeWindow(name));
            }
        }

        let ordered = [
            ("neg_hit_range", self.neg_hit_range, "neg_hit_miss_range", self.neg_hit_miss_range),
            ("pos_hit_range", self.pos_hit_range, "pos_hit_miss_range", self.pos_hit_miss_range),
            ("neg_rel_range", self.neg_rel_range, "neg_rel_miss_range", self.neg_rel_miss_range),
            ("pos_rel_range", self.pos_rel_range, "pos_rel_miss_range", self.pos_rel_miss_range),
            ("pos_hld_range", self.pos_hld_range, "pos_rel_miss_range", self.pos_rel_miss_range),
        ];
        for (inner, iv, outer, ov) in ordered {
            if iv > ov {
                return Err(ConfigError::WindowOrder { inner, outer });
            }
        }

        let radii = [
            ("hitobject_radius", self.hitobject_radius),
            ("follow_radius", self.follow_radius),
            ("release_radius", self.release_radius),
        ];
        for (name, value) in radii {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveRadius(name));
            }
        }

        Ok(self.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build() {
        let settings = Settings::builder().build().unwrap();
        assert_eq!(settings, Settings::default());
        // Read accessors are the only surface a built value exposes
        assert_eq!(settings.neg_hit_range(), 100);
        assert_eq!(settings.pos_hit_miss_range(), 200);
        assert_eq!(settings.hitobject_radius(), 36.5);
        assert!(settings.require_tap_press());
        assert!(!settings.blank_miss());
    }

    #[test]
    fn unknown_name_rejected() {
        let mut builder = Settings::builder();
        let err = builder
            .set("hit_window", SettingValue::Ms(100))
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownOption("hit_window".to_string()));
    }

    #[test]
    fn wrong_value_kind_rejected() {
        let mut builder = Settings::builder();
        let err = builder
            .set("neg_hit_range", SettingValue::Flag(true))
            .unwrap_err();
        assert_eq!(err, ConfigError::WrongValueKind("neg_hit_range"));
        // Nothing was written
        assert_eq!(builder.neg_hit_range, 100);
    }

    #[test]
    fn set_by_name_round_trip() {
        let mut builder = Settings::builder();
        builder
            .set("neg_hit_range", SettingValue::Ms(40))
            .unwrap()
            .set("follow_radius", SettingValue::Px(80.0))
            .unwrap()
            .set("blank_miss", SettingValue::Flag(true))
            .unwrap();
        let settings = builder.build().unwrap();
        assert_eq!(settings.neg_hit_range(), 40);
        assert_eq!(settings.follow_radius(), 80.0);
        assert!(settings.blank_miss());
    }

    #[test]
    fn reserved_flags_accepted() {
        let mut builder = Settings::builder();
        builder
            .set("notelock", SettingValue::Flag(false))
            .unwrap()
            .set("dynamic_window", SettingValue::Flag(true))
            .unwrap()
            .set("overlap_miss_handling", SettingValue::Flag(true))
            .unwrap()
            .set("overlap_hit_handling", SettingValue::Flag(true))
            .unwrap();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn negative_window_rejected() {
        let mut builder = Settings::builder();
        builder.neg_hit_range = -1;
        assert_eq!(
            builder.build().unwrap_err(),
            ConfigError::NegativeWindow("neg_hit_range")
        );
    }

    #[test]
    fn window_order_enforced() {
        let mut builder = Settings::builder();
        builder.neg_hit_range = 300;
        builder.neg_hit_miss_range = 200;
        assert_eq!(
            builder.build().unwrap_err(),
            ConfigError::WindowOrder {
                inner: "neg_hit_range",
                outer: "neg_hit_miss_range"
            }
        );
    }

    #[test]
    fn hold_window_bounded_by_release_miss_window() {
        let mut builder = Settings::builder();
        builder.pos_hld_range = 2000;
        assert_eq!(
            builder.build().unwrap_err(),
            ConfigError::WindowOrder {
                inner: "pos_hld_range",
                outer: "pos_rel_miss_range"
            }
        );
    }

    #[test]
    fn zero_radius_rejected() {
        let mut builder = Settings::builder();
        builder.hitobject_radius = 0.0;
        assert_eq!(
            builder.build().unwrap_err(),
            ConfigError::NonPositiveRadius("hitobject_radius")
        );
    }
}
