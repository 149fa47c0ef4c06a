use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for placement keys.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Identifies one placed-furniture instance within a `PlacementMap`.
/// Internally a `Spur` index: 4 bytes, Copy, O(1) Eq and Hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementKey(Spur);

impl PlacementKey {
    /// Intern a key string, or return the existing handle if already interned.
    pub fn intern(s: &str) -> Self {
        PlacementKey(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice. Interned strings live for the whole
    /// process, so the slice outlives the key.
    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh key: `{unix_millis}_{random suffix}`.
    ///
    /// Keys are never handed out twice in a process, even when two keys are
    /// generated within the same millisecond.
    pub fn generate() -> Self {
        let millis = now_millis();
        loop {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            let candidate = format!("{millis}_{}", &suffix[..9]);
            if INTERNER.get(&candidate).is_none() {
                return Self::intern(&candidate);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

// `SystemTime` is unavailable in the browser.
#[cfg(target_arch = "wasm32")]
fn now_millis() -> u128 {
    js_sys::Date::now() as u128
}

impl fmt::Debug for PlacementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for PlacementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PlacementKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlacementKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PlacementKey::intern(&s))
    }
}
