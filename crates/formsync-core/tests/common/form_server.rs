//! Minimal OpenRosa server for integration tests.
//!
//! Serves `/formList`, `/forms/<file>`, `/manifest/<form id>` and
//! `/media/<form id>/<file>` from an in-memory catalog.

#![allow(dead_code)]

use formsync_core::checksum::md5_bytes;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServedMedia {
    pub filename: String,
    pub body: Vec<u8>,
    /// Leave `<hash>` out of this file's manifest entry.
    pub omit_hash: bool,
}

#[derive(Debug, Clone)]
pub struct ServedForm {
    pub name: String,
    pub form_id: String,
    pub version: String,
    pub file: String,
    pub body: Vec<u8>,
    pub media: Vec<ServedMedia>,
    /// Leave `<hash>` out of this form's list entry.
    pub omit_hash: bool,
    /// Publish a hash that does not match the body.
    pub wrong_hash: bool,
}

impl ServedForm {
    pub fn new(name: &str, form_id: &str, version: &str, file: &str) -> Self {
        let body = format!(
            "<h:html xmlns:h=\"http://www.w3.org/1999/xhtml\"><h:head><h:title>{}</h:title></h:head></h:html>\n",
            name
        )
        .into_bytes();
        Self {
            name: name.to_string(),
            form_id: form_id.to_string(),
            version: version.to_string(),
            file: file.to_string(),
            body,
            media: Vec::new(),
            omit_hash: false,
            wrong_hash: false,
        }
    }

    pub fn without_hash(mut self) -> Self {
        self.omit_hash = true;
        self
    }

    pub fn with_wrong_hash(mut self) -> Self {
        self.wrong_hash = true;
        self
    }

    pub fn with_media(mut self, filename: &str, body: &[u8]) -> Self {
        self.media.push(ServedMedia {
            filename: filename.to_string(),
            body: body.to_vec(),
            omit_hash: false,
        });
        self
    }

    pub fn with_media_without_hash(mut self, filename: &str, body: &[u8]) -> Self {
        self.media.push(ServedMedia {
            filename: filename.to_string(),
            body: body.to_vec(),
            omit_hash: true,
        });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormServer {
    pub forms: Vec<ServedForm>,
    /// Status returned for `/formList` instead of the list (e.g. 404).
    pub form_list_status: Option<u16>,
    /// Answer this many `/formList` requests with 503 before serving normally.
    pub form_list_unavailable: usize,
    /// Number of `/formList` requests received.
    pub form_list_requests: Arc<AtomicUsize>,
}

impl FormServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_form(mut self, form: ServedForm) -> Self {
        self.forms.push(form);
        self
    }

    pub fn unavailable_for(mut self, requests: usize) -> Self {
        self.form_list_unavailable = requests;
        self
    }

    /// Start in a background thread; returns the base URL without trailing slash.
    pub fn start(self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let base = format!("http://127.0.0.1:{}", port);
        let state = Arc::new((self, base.clone()));
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&state);
                thread::spawn(move || handle(stream, &state.0, &state.1));
            }
        });
        base
    }
}

fn form_list_xml(server: &FormServer, base: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<xforms xmlns=\"http://openrosa.org/xforms/xformsList\">\n",
    );
    for f in &server.forms {
        xml.push_str("  <xform>\n");
        xml.push_str(&format!("    <formID>{}</formID>\n", f.form_id));
        xml.push_str(&format!("    <name>{}</name>\n", f.name));
        xml.push_str(&format!("    <version>{}</version>\n", f.version));
        if !f.omit_hash {
            let digest = if f.wrong_hash {
                md5_bytes(b"something else")
            } else {
                md5_bytes(&f.body)
            };
            xml.push_str(&format!("    <hash>md5:{}</hash>\n", digest));
        }
        xml.push_str(&format!(
            "    <downloadUrl>{}/forms/{}</downloadUrl>\n",
            base, f.file
        ));
        if !f.media.is_empty() {
            // Relative on purpose: the client resolves it against the list URL.
            xml.push_str(&format!(
                "    <manifestUrl>manifest/{}</manifestUrl>\n",
                f.form_id
            ));
        }
        xml.push_str("  </xform>\n");
    }
    xml.push_str("</xforms>\n");
    xml
}

fn manifest_xml(form: &ServedForm, base: &str) -> String {
    let mut xml =
        String::from("<manifest xmlns=\"http://openrosa.org/xforms/xformsManifest\">\n");
    for m in &form.media {
        let hash = if m.omit_hash {
            String::new()
        } else {
            format!("<hash>md5:{}</hash>", md5_bytes(&m.body))
        };
        xml.push_str(&format!(
            "  <mediaFile><filename>{}</filename>{}<downloadUrl>{}/media/{}/{}</downloadUrl></mediaFile>\n",
            m.filename, hash, base, form.form_id, m.filename
        ));
    }
    xml.push_str("</manifest>\n");
    xml
}

fn respond(stream: &mut TcpStream, status: &str, content_type: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nX-OpenRosa-Version: 1.0\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn status_line(code: u16) -> String {
    let reason = match code {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Error",
    };
    format!("{} {}", code, reason)
}

fn handle(mut stream: TcpStream, server: &FormServer, base: &str) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");
    if !method.eq_ignore_ascii_case("GET") {
        respond(&mut stream, "405 Method Not Allowed", "text/plain", b"");
        return;
    }

    if path == "/formList" {
        let seen = server.form_list_requests.fetch_add(1, Ordering::SeqCst);
        if seen < server.form_list_unavailable {
            respond(&mut stream, &status_line(503), "text/plain", b"busy");
            return;
        }
        match server.form_list_status {
            Some(code) => respond(&mut stream, &status_line(code), "text/plain", b"nope"),
            None => {
                let xml = form_list_xml(server, base);
                respond(&mut stream, "200 OK", "text/xml; charset=utf-8", xml.as_bytes());
            }
        }
        return;
    }
    if let Some(file) = path.strip_prefix("/forms/") {
        if let Some(f) = server.forms.iter().find(|f| f.file == file) {
            respond(&mut stream, "200 OK", "text/xml", &f.body);
            return;
        }
    }
    if let Some(form_id) = path.strip_prefix("/manifest/") {
        if let Some(f) = server.forms.iter().find(|f| f.form_id == form_id) {
            let xml = manifest_xml(f, base);
            respond(&mut stream, "200 OK", "text/xml", xml.as_bytes());
            return;
        }
    }
    if let Some(rest) = path.strip_prefix("/media/") {
        if let Some((form_id, name)) = rest.split_once('/') {
            let media = server
                .forms
                .iter()
                .filter(|f| f.form_id == form_id)
                .flat_map(|f| f.media.iter())
                .find(|m| m.filename == name);
            if let Some(m) = media {
                respond(&mut stream, "200 OK", "application/octet-stream", &m.body);
                return;
            }
        }
    }
    respond(&mut stream, &status_line(404), "text/plain", b"not found");
}
