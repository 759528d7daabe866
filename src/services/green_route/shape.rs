use geo::Coord;

#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("Invalid shape character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },

    #[error("Malformed shape: {0}")]
    Malformed(String),

    #[error("Decoded coordinate out of range: ({lon}, {lat})")]
    OutOfRange { lon: f64, lat: f64 },
}

/// Decodes engine route shapes (signed-value polyline encoding).
#[derive(Debug, Clone, Copy)]
pub struct ShapeDecoder {
    precision: u32,
}

impl ShapeDecoder {
    pub fn new(precision: u32) -> Self {
        ShapeDecoder { precision }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Decode into route-ordered coordinates, x = lon, y = lat.
    pub fn try_decode(&self, encoded: &str) -> Result<Vec<Coord<f64>>, ShapeError> {
        if encoded.is_empty() {
            return Ok(Vec::new());
        }

        // Every polyline chunk byte is in 63..=127
        if let Some((index, character)) = encoded
            .char_indices()
            .find(|(_, ch)| !('?'..='\u{7f}').contains(ch))
        {
            return Err(ShapeError::InvalidCharacter { character, index });
        }

        let line = polyline::decode_polyline(encoded, self.precision)
            .map_err(|e| ShapeError::Malformed(e.to_string()))?;

        let coords: Vec<Coord<f64>> = line.into_inner();
        if let Some(bad) = coords
            .iter()
            .find(|c| !((-180.0..=180.0).contains(&c.x) && (-90.0..=90.0).contains(&c.y)))
        {
            return Err(ShapeError::OutOfRange {
                lon: bad.x,
                lat: bad.y,
            });
        }

        Ok(coords)
    }

    /// Like `try_decode`, but malformed input decodes to an empty route.
    pub fn decode(&self, encoded: &str) -> Vec<Coord<f64>> {
        self.try_decode(encoded).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Discarding undecodable route shape");
            Vec::new()
        })
    }
}
