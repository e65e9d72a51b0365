//! multipart/form-data wire format (RFC 7578 shape).
//!
//! Writer layout, byte for byte:
//!
//! ```text
//! --{boundary}\r\n
//! Content-Disposition: form-data; name="<key>"[; filename="<name>"]\r\n
//! [Content-Type: <type>\r\n]
//! \r\n
//! <body>
//! \r\n--{boundary}\r\n        (before every subsequent part)
//! ...
//! \r\n--{boundary}--\r\n      (terminator)
//! ```
//!
//! No CRLF precedes the first part. The parser accepts exactly this
//! grammar back into a [`FlatForm`]: parts carrying a `filename` or a
//! `Content-Type` header become file values, everything else is text.

use crate::error::CodecError;
use crate::flat::FlatForm;
use crate::value::{FileBlob, FormValue};

/// Longest boundary RFC 2046 permits.
const MAX_BOUNDARY_LEN: usize = 70;

/// Check a boundary token against the RFC 2046 alphabet.
fn validate_boundary(boundary: &str) -> Result<(), CodecError> {
    if boundary.is_empty() {
        return Err(CodecError::InvalidBoundary("boundary is empty".into()));
    }
    if boundary.len() > MAX_BOUNDARY_LEN {
        return Err(CodecError::InvalidBoundary(format!(
            "boundary exceeds {MAX_BOUNDARY_LEN} characters"
        )));
    }
    let legal = |c: char| {
        c.is_ascii_alphanumeric() || "'()+_,-./:=? ".contains(c)
    };
    if let Some(bad) = boundary.chars().find(|&c| !legal(c)) {
        return Err(CodecError::InvalidBoundary(format!(
            "illegal character {bad:?}"
        )));
    }
    if boundary.ends_with(' ') {
        return Err(CodecError::InvalidBoundary(
            "boundary must not end with a space".into(),
        ));
    }
    Ok(())
}

/// Check a value interpolated into a `Content-Disposition` quoted
/// string. Quotes and line breaks would corrupt the header framing, so
/// they are rejected rather than escaped. Codec-generated keys never
/// contain them; this guards direct callers.
fn validate_header_token(what: &str, value: &str) -> Result<(), CodecError> {
    if value.contains(['"', '\r', '\n']) {
        return Err(CodecError::MalformedPayload(format!(
            "{what} {value:?} contains a quote or line break"
        )));
    }
    Ok(())
}

/// Render a flat form as a multipart/form-data payload.
pub fn write_multipart(form: &FlatForm, boundary: &str) -> Result<Vec<u8>, CodecError> {
    validate_boundary(boundary)?;

    let mut out = Vec::new();
    for (i, (key, value)) in form.iter().enumerate() {
        validate_header_token("part name", key)?;
        if let Some(blob) = value.as_file() {
            if let Some(filename) = &blob.filename {
                validate_header_token("filename", filename)?;
            }
        }
        if i > 0 {
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match value {
            FormValue::Text(text) => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{key}\"\r\n\r\n").as_bytes(),
                );
                out.extend_from_slice(text.as_bytes());
            }
            FormValue::File(blob) => {
                out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{key}\"; filename=\"{}\"\r\n\
                         Content-Type: {}\r\n\r\n",
                        blob.filename.as_deref().unwrap_or(""),
                        blob.content_type(),
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(&blob.bytes);
            }
        }
    }
    if !form.is_empty() {
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    Ok(out)
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

struct PartHeaders {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
}

fn parse_headers(raw: &str) -> Result<PartHeaders, CodecError> {
    let mut name = None;
    let mut filename = None;
    let mut content_type = None;

    for line in raw.split("\r\n") {
        if let Some(rest) = line.strip_prefix("Content-Disposition:") {
            for piece in rest.split(';') {
                let piece = piece.trim();
                if let Some(v) = piece.strip_prefix("name=") {
                    name = Some(strip_quotes(v).to_string());
                } else if let Some(v) = piece.strip_prefix("filename=") {
                    filename = Some(strip_quotes(v).to_string());
                }
            }
        } else if let Some(rest) = line.strip_prefix("Content-Type:") {
            content_type = Some(rest.trim().to_string());
        }
    }

    let name = name.ok_or_else(|| {
        CodecError::MalformedPayload("part without a form-data name".into())
    })?;
    Ok(PartHeaders {
        name,
        filename,
        content_type,
    })
}

/// Parse a multipart/form-data payload back into a flat form.
pub fn parse_multipart(bytes: &[u8], boundary: &str) -> Result<FlatForm, CodecError> {
    validate_boundary(boundary)?;

    let open = format!("--{boundary}").into_bytes();
    let separator = format!("\r\n--{boundary}").into_bytes();

    if !bytes.starts_with(&open) {
        return Err(CodecError::MalformedPayload(
            "payload does not open with the boundary delimiter".into(),
        ));
    }

    let mut form = FlatForm::new();
    let mut pos = open.len();
    loop {
        let rest = &bytes[pos..];
        if rest.starts_with(b"--") {
            // Closing delimiter; anything after it is an epilogue.
            break;
        }
        if !rest.starts_with(b"\r\n") {
            return Err(CodecError::MalformedPayload(
                "boundary delimiter not followed by CRLF".into(),
            ));
        }
        pos += 2;

        let header_end = find(bytes, b"\r\n\r\n", pos).ok_or_else(|| {
            CodecError::MalformedPayload("part headers are not terminated".into())
        })?;
        let headers = std::str::from_utf8(&bytes[pos..header_end])
            .map_err(|_| CodecError::MalformedPayload("part headers are not UTF-8".into()))?;
        let headers = parse_headers(headers)?;

        let body_start = header_end + 4;
        let body_end = find(bytes, &separator, body_start).ok_or_else(|| {
            CodecError::MalformedPayload("part body is not terminated by a boundary".into())
        })?;
        let body = &bytes[body_start..body_end];

        if headers.filename.is_some() || headers.content_type.is_some() {
            form.insert(
                headers.name,
                FormValue::File(FileBlob {
                    filename: headers.filename.filter(|f| !f.is_empty()),
                    media_type: headers.content_type,
                    bytes: body.to_vec(),
                }),
            );
        } else {
            let text = String::from_utf8(body.to_vec()).map_err(|_| {
                CodecError::MalformedPayload("text part body is not UTF-8".into())
            })?;
            form.insert(headers.name, FormValue::Text(text));
        }

        pos = body_end + separator.len();
    }

    Ok(form)
}
