pub trait FromCoordinates <T> {
    /// Creates a new instance of the struct from the given coordinates.
    /// # Arguments
    /// * `position` - The coordinates to create the struct from.
    /// # Returns
    /// A new instance of the struct.
    /// # Example
    /// ```
    /// use rs_rigid::models::Vector3;
    /// use rs_rigid::models::FromCoordinates;
    ///
    /// let v = Vector3::from_coord((1.0, 2.0, 3.0));
    /// assert_eq!(v.x, 1.0);
    /// assert_eq!(v.z, 3.0);
    /// ```
    fn from_coord(position: T) -> Self;
}

pub trait ToCoordinates <T> {
    /// Converts the struct to a tuple of coordinates.
    /// # Returns
    /// A tuple of coordinates.
    /// # Example
    /// ```
    /// use rs_rigid::models::Vector3;
    /// use rs_rigid::models::ToCoordinates;
    ///
    /// let v = Vector3::new(1.0, 2.0, 3.0);
    /// let coordinates = v.to_coord();
    ///
    /// assert_eq!(coordinates, (1.0, 2.0, 3.0));
    /// ```
    fn to_coord(&self) -> T;
}
