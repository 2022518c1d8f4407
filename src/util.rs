//! Common color helpers shared by the rendering pipeline.

/// Squared Euclidean distance between two colors in RGB space.
///
/// Comparing squared distances orders colors exactly like comparing the
/// distances themselves, without going through floating point.
#[inline]
pub fn distance_squared(a: [u8; 3], b: [u8; 3]) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Composites a straight-alpha RGBA color over a black backdrop.
///
/// Each channel becomes `round(c * a / 255)`. Fully opaque colors are returned
/// unchanged and fully transparent ones become black.
pub fn blend_over_black([r, g, b, a]: [u8; 4]) -> [u8; 3] {
    match a {
        255 => [r, g, b],
        0 => [0, 0, 0],
        a => {
            let a = a as u32;
            let scale = |c: u8| ((c as u32 * a + 127) / 255) as u8;
            [scale(r), scale(g), scale(b)]
        }
    }
}

/// Decodes a packed `0xAARRGGBB` pixel and composites it over black.
pub fn unpack_argb(argb: u32) -> [u8; 3] {
    let [a, r, g, b] = argb.to_be_bytes();
    blend_over_black([r, g, b, a])
}

/// Makes an escape-coded string printable as plain text.
///
/// Line feeds, carriage returns and ESC characters are replaced by the literal
/// sequences `\n`, `\r` and `\033`, so the result can be pasted into something
/// like `echo -e` or `printf`.
pub fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\x1b' => escaped.push_str("\\033"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance_squared([0, 0, 0], [0, 0, 0]), 0);
        assert_eq!(distance_squared([0, 0, 0], [255, 255, 255]), 3 * 255 * 255);
        assert_eq!(distance_squared([10, 0, 0], [0, 0, 0]), 100);
        assert_eq!(distance_squared([3, 4, 0], [0, 0, 0]), 25);
    }

    #[test]
    fn test_blend_over_black() {
        assert_eq!(blend_over_black([200, 100, 50, 255]), [200, 100, 50]);
        assert_eq!(blend_over_black([200, 100, 50, 0]), [0, 0, 0]);
        // half transparent: 255 * 128 / 255 = 128, 100 * 128 / 255 = 50.19 -> 50
        assert_eq!(blend_over_black([255, 100, 0, 128]), [128, 50, 0]);
    }

    #[test]
    fn test_unpack_argb() {
        assert_eq!(unpack_argb(0xFFB20000), [178, 0, 0]);
        assert_eq!(unpack_argb(0x00FFFFFF), [0, 0, 0]);
        assert_eq!(unpack_argb(0x80FF0000), [128, 0, 0]);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("\x1b[31mA\x1b[0m\r\n"), "\\033[31mA\\033[0m\\r\\n");
        assert_eq!(escape("plain █"), "plain █");
    }
}
