/// Seat sequence plus a cursor at the active seat.
///
/// The sequence only changes through [`TurnOrder::reverse`], which rebuilds it
/// once around the active seat; every other movement is cursor arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOrder {
    seats: Vec<usize>,
    cursor: usize,
}

impl TurnOrder {
    /// Seats `0..num_seats` in ascending order with `first` active.
    pub fn new(num_seats: usize, first: usize) -> Self {
        let seats: Vec<usize> = (0..num_seats).collect();
        let cursor = if num_seats == 0 { 0 } else { first % num_seats };
        Self { seats, cursor }
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn seats(&self) -> &[usize] {
        &self.seats
    }

    /// The active seat.
    pub fn current(&self) -> usize {
        self.seats.get(self.cursor).copied().unwrap_or(0)
    }

    /// The seat `steps` positions after the active one.
    pub fn peek(&self, steps: usize) -> usize {
        if self.seats.is_empty() {
            return 0;
        }
        self.seats[(self.cursor + steps) % self.seats.len()]
    }

    pub fn advance(&mut self) -> usize {
        self.advance_by(1)
    }

    /// Move past the next seat without giving it a turn.
    pub fn skip_next(&mut self) -> usize {
        self.advance_by(2)
    }

    pub fn advance_by(&mut self, steps: usize) -> usize {
        if !self.seats.is_empty() {
            self.cursor = (self.cursor + steps) % self.seats.len();
        }
        self.current()
    }

    /// Reverse the direction of play around the active seat: the seats that
    /// would have followed it are replayed in the opposite order.
    ///
    /// ```
    /// use uno_rs::order::TurnOrder;
    ///
    /// let mut order = TurnOrder::new(4, 0);
    /// order.reverse();
    /// assert_eq!(order.seats(), &[0, 3, 2, 1]);
    /// assert_eq!(order.advance(), 3);
    /// ```
    pub fn reverse(&mut self) {
        let n = self.seats.len();
        if n < 2 {
            return;
        }
        let mut rebuilt = Vec::with_capacity(n);
        rebuilt.push(self.current());
        rebuilt.extend((1..n).rev().map(|k| self.seats[(self.cursor + k) % n]));
        self.seats = rebuilt;
        self.cursor = 0;
    }

    /// Seats in the order they will act, starting with the active one.
    pub fn upcoming(&self) -> Vec<usize> {
        (0..self.seats.len()).map(|k| self.peek(k)).collect()
    }
}
