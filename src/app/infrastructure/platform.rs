/// Operating system family, as far as theme and font defaults are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Monospace family every install of the platform ships with.
    pub fn monospace_font_family(&self) -> &'static str {
        match self {
            Self::Windows => "Consolas",
            Self::MacOs => "Menlo",
            Self::Linux | Self::Other => "Monospace",
        }
    }
}

pub fn detect_system_dark_mode() -> bool {
    // Windows: Check registry for dark mode preference
    #[cfg(target_os = "windows")]
    {
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        if let Ok(hkcu) = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        {
            // AppsUseLightTheme: 0 = dark mode, 1 = light mode
            if let Ok(value) = hkcu.get_value::<u32, _>("AppsUseLightTheme") {
                return value == 0;
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        use std::process::Command;

        // GNOME 42+ exposes color-scheme; older desktops only name the theme.
        for (key, needle) in [("color-scheme", "prefer-dark"), ("gtk-theme", "dark")] {
            if let Ok(output) = Command::new("gsettings")
                .args(["get", "org.gnome.desktop.interface", key])
                .output()
            {
                let value = String::from_utf8_lossy(&output.stdout).to_lowercase();
                if value.contains(needle) {
                    tracing::debug!("Dark mode detected from gsettings {}", key);
                    return true;
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        use std::process::Command;

        if let Ok(output) = Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            if output.status.success() {
                let style = String::from_utf8_lossy(&output.stdout).to_lowercase();
                if style.contains("dark") {
                    return true;
                }
            }
        }
    }

    tracing::debug!("No dark mode preference detected, assuming light");
    false
}
