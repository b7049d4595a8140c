//! How far a listing descends into subfolders

/// Depth control for [`get_listings`](crate::DriveClient::get_listings).
///
/// Converts from `bool` (`false` = no expansion, `true` = unbounded) and from
/// `u32` (number of folder levels to expand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecursionSpec {
    /// List the folder itself only
    #[default]
    None,
    /// Expand this many levels below the folder
    Depth(u32),
    /// Expand every subfolder, however deep
    Unbounded,
}

impl RecursionSpec {
    /// Whether subfolders of the current level should be listed
    pub fn expands(self) -> bool {
        match self {
            RecursionSpec::None | RecursionSpec::Depth(0) => false,
            RecursionSpec::Depth(_) | RecursionSpec::Unbounded => true,
        }
    }

    /// Spec handed to the children of the current level
    pub fn next(self) -> Self {
        match self {
            RecursionSpec::Unbounded => RecursionSpec::Unbounded,
            RecursionSpec::Depth(n) if n > 1 => RecursionSpec::Depth(n - 1),
            RecursionSpec::Depth(_) | RecursionSpec::None => RecursionSpec::None,
        }
    }
}

impl From<bool> for RecursionSpec {
    fn from(recursive: bool) -> Self {
        if recursive {
            RecursionSpec::Unbounded
        } else {
            RecursionSpec::None
        }
    }
}

impl From<u32> for RecursionSpec {
    fn from(depth: u32) -> Self {
        if depth == 0 {
            RecursionSpec::None
        } else {
            RecursionSpec::Depth(depth)
        }
    }
}
