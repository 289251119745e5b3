use serde::{Serialize, Serializer};
use std::fmt;

/// The six movie categories the site is queried in. The site knows more, but
/// these are the ones the aggregator covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    HdHun,
    HdEng,
    DvdHun,
    DvdEng,
    SdHun,
    SdEng,
}

impl Category {
    /// Query priority order: HD first, then DVD, then SD, Hungarian before
    /// English within each resolution. Ties in the final ranking keep this
    /// order.
    pub const ALL: [Category; 6] = [
        Category::HdHun,
        Category::HdEng,
        Category::DvdHun,
        Category::DvdEng,
        Category::SdHun,
        Category::SdEng,
    ];

    /// The `miben` query parameter value the site expects.
    pub fn code(&self) -> &'static str {
        match self {
            Category::HdHun => "hd_hun",
            Category::HdEng => "hd",
            Category::DvdHun => "dvd_hun",
            Category::DvdEng => "dvd",
            Category::SdHun => "xvid_hun",
            Category::SdEng => "xvid",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
