use std::fmt;
use std::str::FromStr;

/// Card colors. `Wild` is the black of an unplayed wild card; the four real
/// colors are the only ones a played card can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
}

impl Color {
    /// The four colors a wild may be assigned.
    pub const REAL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    pub const fn is_real(self) -> bool {
        !matches!(self, Color::Wild)
    }

    pub const fn to_char(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Yellow => 'y',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::Wild => 'w',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ColorParseError {
    #[error("invalid color: '{0}'")]
    Invalid(String),
}

impl FromStr for Color {
    type Err = ColorParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Color::try_from(c);
        }
        match t.to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "wild" | "black" => Ok(Color::Wild),
            _ => Err(ColorParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Color {
    type Error = ColorParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'r' => Ok(Color::Red),
            'y' => Ok(Color::Yellow),
            'g' => Ok(Color::Green),
            'b' => Ok(Color::Blue),
            'w' => Ok(Color::Wild),
            _ => Err(ColorParseError::Invalid(c.to_string())),
        }
    }
}

/// Numerals and action types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Rank {
    pub const NUMERALS: [Rank; 10] = [
        Rank::Zero,
        Rank::One,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
    ];

    pub const ACTIONS: [Rank; 3] = [Rank::Skip, Rank::Reverse, Rank::DrawTwo];

    pub const WILDS: [Rank; 2] = [Rank::Wild, Rank::WildDrawFour];

    /// Face value for numerals, `None` for action and wild ranks.
    pub const fn numeral(self) -> Option<u8> {
        match self {
            Rank::Zero => Some(0),
            Rank::One => Some(1),
            Rank::Two => Some(2),
            Rank::Three => Some(3),
            Rank::Four => Some(4),
            Rank::Five => Some(5),
            Rank::Six => Some(6),
            Rank::Seven => Some(7),
            Rank::Eight => Some(8),
            Rank::Nine => Some(9),
            _ => None,
        }
    }

    pub const fn is_wild(self) -> bool {
        matches!(self, Rank::Wild | Rank::WildDrawFour)
    }

    /// Skip, Reverse, DrawTwo and WildDrawFour carry an effect; a plain Wild only sets the color.
    pub const fn is_action(self) -> bool {
        matches!(self, Rank::Skip | Rank::Reverse | Rank::DrawTwo | Rank::WildDrawFour)
    }

    /// Cards the next player must draw when this rank is played.
    pub const fn penalty(self) -> usize {
        match self {
            Rank::DrawTwo => 2,
            Rank::WildDrawFour => 4,
            _ => 0,
        }
    }

    pub const fn is_draw(self) -> bool {
        self.penalty() > 0
    }

    pub const fn points(self) -> u32 {
        match self.numeral() {
            Some(v) => v as u32,
            None if self.is_wild() => 50,
            None => 20,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Rank::Zero => "0",
            Rank::One => "1",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Skip => "S",
            Rank::Reverse => "R",
            Rank::DrawTwo => "+2",
            Rank::Wild => "W",
            Rank::WildDrawFour => "W+4",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let r = match upper.as_str() {
            "0" => Rank::Zero,
            "1" => Rank::One,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "S" | "SKIP" => Rank::Skip,
            "R" | "REVERSE" => Rank::Reverse,
            "+2" | "D2" | "DRAW_TWO" => Rank::DrawTwo,
            "W" | "WILD" => Rank::Wild,
            "W+4" | "W4" | "WILD_DRAW_FOUR" => Rank::WildDrawFour,
            _ => return Err(RankParseError::Invalid(s.to_string())),
        };
        Ok(r)
    }
}

/// A card: color + rank. Equality is by the pair, so two red fives are
/// interchangeable.
///
/// ```
/// use uno_rs::cards::{Card, Color, Rank};
///
/// let card = Card::new(Color::Red, Rank::Five);
/// assert_eq!(card.to_string(), "r5");
/// assert_eq!(Card::wild().with_color(Color::Blue).to_string(), "W:b");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    color: Color,
    rank: Rank,
}

impl Card {
    pub const fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    pub const fn wild() -> Self {
        Self::new(Color::Wild, Rank::Wild)
    }

    pub const fn wild_draw_four() -> Self {
        Self::new(Color::Wild, Rank::WildDrawFour)
    }

    pub const fn color(self) -> Color {
        self.color
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn is_wild(self) -> bool {
        self.rank.is_wild()
    }

    /// A wild that has not been given a real color yet.
    pub const fn is_uncolored(self) -> bool {
        !self.color.is_real()
    }

    pub const fn points(self) -> u32 {
        self.rank.points()
    }

    /// The record of a wild played with `color`. Non-wild cards are returned
    /// unchanged; their color is fixed.
    pub const fn with_color(self, color: Color) -> Self {
        if self.rank.is_wild() {
            Self { color, rank: self.rank }
        } else {
            self
        }
    }

    /// Strip a played wild's assigned color before it goes back into the draw pile.
    pub const fn reset(self) -> Self {
        if self.rank.is_wild() {
            Self { color: Color::Wild, rank: self.rank }
        } else {
            self
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rank.is_wild() {
            if self.color.is_real() {
                write!(f, "{}:{}", self.rank, self.color)
            } else {
                write!(f, "{}", self.rank)
            }
        } else {
            write!(f, "{}{}", self.color, self.rank)
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error(transparent)]
    Rank(#[from] RankParseError),
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(CardParseError::Invalid(s.to_string()));
        }

        // wilds: "W", "W+4", optionally ":<color>"
        let upper = t.to_ascii_uppercase();
        if upper.starts_with('W') {
            let (rank_str, color) = match t.split_once(':') {
                Some((r, c)) => (r, Color::from_str(c)?),
                None => (t, Color::Wild),
            };
            let rank = Rank::from_str(rank_str)?;
            if !rank.is_wild() {
                return Err(CardParseError::Invalid(s.to_string()));
            }
            return Ok(Card::new(color, rank));
        }

        let mut chars = t.chars();
        let color_ch = chars.next().ok_or_else(|| CardParseError::Invalid(s.to_string()))?;
        let color = Color::try_from(color_ch)?;
        let rank = Rank::from_str(chars.as_str())?;
        if rank.is_wild() || !color.is_real() {
            return Err(CardParseError::Invalid(s.to_string()));
        }
        Ok(Card::new(color, rank))
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use uno_rs::cards::{parse_cards, Card, Color, Rank};
///
/// let cards = parse_cards("r5, b+2 W+4").unwrap();
/// assert_eq!(cards[0], Card::new(Color::Red, Rank::Five));
/// assert_eq!(cards[1], Card::new(Color::Blue, Rank::DrawTwo));
/// assert_eq!(cards[2], Card::wild_draw_four());
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

/// Sum of point values, used for round scoring.
pub fn hand_points(cards: &[Card]) -> u32 {
    cards.iter().map(|c| c.points()).sum()
}
