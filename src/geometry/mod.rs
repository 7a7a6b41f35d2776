//! Geometric primitives in PDF user space (points, origin at bottom-left).

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point on the circle of `radius` around `center` at `angle` radians,
    /// measured counter-clockwise from the positive x axis.
    ///
    /// ```
    /// use tinypdf::geometry::Point;
    ///
    /// let p = Point::on_circle(Point::new(10.0, 10.0), 5.0, 0.0);
    /// assert_eq!(p, Point::new(15.0, 10.0));
    /// ```
    pub fn on_circle(center: Point, radius: f64, angle: f64) -> Self {
        Self::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    }
}

/// An axis-aligned rectangle given by its lower-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of the lower-left corner
    pub x: f64,
    /// Y coordinate of the lower-left corner
    pub y: f64,
    /// Width of rectangle
    pub width: f64,
    /// Height of rectangle
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// ```
    /// use tinypdf::geometry::Rect;
    ///
    /// let rect = Rect::new(50.0, 700.0, 50.0, 12.0);
    /// assert_eq!(rect.right(), 100.0);
    /// assert_eq!(rect.top(), 712.0);
    /// ```
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the top edge.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Corners as `[llx, lly, urx, ury]`.
    pub fn corners(&self) -> [f64; 4] {
        [self.x, self.y, self.right(), self.top()]
    }
}
