use crate::error::ConfigError;
use crate::keyframe::PointCloud;
use fnv::FnvHashMap;

/// Named keyframes sharing one point count.
///
/// Morphing is pointwise by index, so every cloud must have exactly the same
/// length; this is enforced on insert.
#[derive(Clone, Debug, Default)]
pub struct KeyframeSet {
    clouds: Vec<PointCloud>,
    names: Vec<String>,
    index: FnvHashMap<String, usize>,
}

impl KeyframeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`KeyframeSet::insert`].
    pub fn with(mut self, name: &str, cloud: PointCloud) -> Result<Self, ConfigError> {
        self.insert(name, cloud)?;
        Ok(self)
    }

    pub fn insert(&mut self, name: &str, cloud: PointCloud) -> Result<usize, ConfigError> {
        if cloud.is_empty() {
            return Err(ConfigError::EmptyKeyframe(name.to_string()));
        }
        if self.index.contains_key(name) {
            return Err(ConfigError::DuplicateKeyframe(name.to_string()));
        }
        if let Some(first) = self.clouds.first() {
            if first.len() != cloud.len() {
                return Err(ConfigError::PointCountMismatch {
                    name: name.to_string(),
                    expected: first.len(),
                    actual: cloud.len(),
                });
            }
        }
        let idx = self.clouds.len();
        self.clouds.push(cloud);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        Ok(idx)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&PointCloud> {
        self.clouds.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&PointCloud> {
        self.index_of(name).and_then(|i| self.get(i))
    }

    #[inline]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Shared point count, 0 when empty.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.clouds.first().map_or(0, PointCloud::len)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}
