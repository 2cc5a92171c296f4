//! Bilingual labels (English / Chinese) and language selection.

use serde::Deserialize;

use crate::state::style::LightStyle;

/// Language setting as written in the configuration file.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSetting {
    /// Follow `LC_ALL` / `LC_MESSAGES` / `LANG`.
    Auto,
    En,
    Zh,
}

impl LanguageSetting {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageSetting::Auto => "auto",
            LanguageSetting::En => "en",
            LanguageSetting::Zh => "zh",
        }
    }

    pub fn resolve(self) -> Language {
        match self {
            LanguageSetting::En => Language::English,
            LanguageSetting::Zh => Language::Chinese,
            LanguageSetting::Auto => Language::from_env(),
        }
    }
}

impl std::str::FromStr for LanguageSetting {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(LanguageSetting::Auto),
            "en" | "english" => Ok(LanguageSetting::En),
            "zh" | "chinese" => Ok(LanguageSetting::Zh),
            other => anyhow::bail!("Unknown language '{other}' (expected auto, en or zh)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    /// Pick the language from the first non-empty locale variable.
    pub fn from_env() -> Self {
        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty());
        Self::from_locale(locale.as_deref())
    }

    pub fn from_locale(locale: Option<&str>) -> Self {
        match locale {
            Some(value) if value.to_ascii_lowercase().starts_with("zh") => Language::Chinese,
            _ => Language::English,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "Chinese",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Language::English => Labels::english(),
            Language::Chinese => Labels::chinese(),
        }
    }
}

/// Every user-facing string of the session screen.
#[derive(Debug)]
pub struct Labels {
    pub light_on: &'static str,
    pub light_off: &'static str,
    pub brightness: &'static str,
    pub screen_brightness: &'static str,
    pub screen_brightness_unavailable: &'static str,
    pub change_color: &'static str,
    pub custom_color: &'static str,
    pub change_style: &'static str,
    pub set_timer: &'static str,
    pub cancel: &'static str,
    pub confirm: &'static str,
    pub times_up: &'static str,
    pub timer_mode: &'static str,
    pub mode_duration: &'static str,
    pub mode_clock_time: &'static str,
    pub choose_duration: &'static str,
    pub choose_time: &'static str,
    pub hint: &'static str,
    pub dialog_hint: &'static str,
    pub presets: [&'static str; 4],
    pub styles: [&'static str; 3],
    minutes_format: MinutesFormat,
}

#[derive(Debug)]
enum MinutesFormat {
    Spaced(&'static str),
    Suffix(&'static str),
}

static ENGLISH: Labels = Labels {
    light_on: "Light on",
    light_off: "Light off",
    brightness: "Brightness",
    screen_brightness: "Screen brightness",
    screen_brightness_unavailable: "Screen brightness (unavailable)",
    change_color: "Change color",
    custom_color: "Custom color",
    change_style: "Change style",
    set_timer: "Set timer",
    cancel: "Cancel",
    confirm: "Set",
    times_up: "Time's up",
    timer_mode: "Timer mode",
    mode_duration: "Duration",
    mode_clock_time: "Clock time",
    choose_duration: "Duration",
    choose_time: "Time",
    hint: "space on/off  ←→ brightness  ↑↓ screen  c/1-8 color  p custom  s style  t timer  q quit",
    dialog_hint: "tab mode  ←→/↑↓ adjust  enter set  esc cancel",
    presets: ["30 minutes", "1 hour", "2 hours", "4 hours"],
    styles: ["Circle", "Square", "Ring"],
    minutes_format: MinutesFormat::Spaced("minutes"),
};

static CHINESE: Labels = Labels {
    light_on: "开灯",
    light_off: "关灯",
    brightness: "亮度",
    screen_brightness: "屏幕亮度",
    screen_brightness_unavailable: "屏幕亮度（不可用）",
    change_color: "更换颜色",
    custom_color: "自定义颜色",
    change_style: "切换样式",
    set_timer: "设置定时",
    cancel: "取消",
    confirm: "设置",
    times_up: "时间到",
    timer_mode: "定时模式",
    mode_duration: "持续时间",
    mode_clock_time: "具体时间",
    choose_duration: "选择时长",
    choose_time: "选择时间",
    hint: "空格 开关  ←→ 亮度  ↑↓ 屏幕  c/1-8 颜色  p 自定义  s 样式  t 定时  q 退出",
    dialog_hint: "tab 模式  ←→/↑↓ 调整  回车 设置  esc 取消",
    presets: ["30分钟", "1小时", "2小时", "4小时"],
    styles: ["圆形", "方形", "圆环"],
    minutes_format: MinutesFormat::Suffix("分钟"),
};

impl Labels {
    pub fn english() -> &'static Labels {
        &ENGLISH
    }

    pub fn chinese() -> &'static Labels {
        &CHINESE
    }

    /// "25 minutes" / "25分钟".
    pub fn minutes(&self, minutes: i64) -> String {
        match self.minutes_format {
            MinutesFormat::Spaced(word) => format!("{minutes} {word}"),
            MinutesFormat::Suffix(word) => format!("{minutes}{word}"),
        }
    }

    pub fn style(&self, style: LightStyle) -> &'static str {
        self.styles[style.index()]
    }

    pub fn on_off(&self, is_on: bool) -> &'static str {
        if is_on { self.light_on } else { self.light_off }
    }
}
