//! Blocking GET over libcurl with OpenRosa request headers.

use curl::easy::{Auth, Easy, List};
use md5::{Digest, Md5};
use std::io::Write;
use std::str;

use super::{FetchError, ServerClient};

/// What a completed GET produced besides the body.
pub(crate) struct Response {
    pub headers: Vec<String>,
}

/// A body streamed to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    pub bytes: u64,
    /// MD5 of the body as lowercase hex.
    pub md5: String,
}

impl Response {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (n, v) = line.split_once(':')?;
            n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}

impl ServerClient {
    fn configured_easy(&self, url: &str) -> Result<Easy, FetchError> {
        let curl_err = |source| FetchError::Curl {
            url: url.to_string(),
            source,
        };

        let mut easy = Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.follow_location(true).map_err(curl_err)?;
        easy.max_redirections(10).map_err(curl_err)?;
        easy.connect_timeout(self.connect_timeout).map_err(curl_err)?;
        easy.timeout(self.timeout).map_err(curl_err)?;

        let mut list = List::new();
        list.append("X-OpenRosa-Version: 1.0").map_err(curl_err)?;
        easy.http_headers(list).map_err(curl_err)?;

        if let Some((user, password)) = &self.credentials {
            easy.username(user).map_err(curl_err)?;
            easy.password(password).map_err(curl_err)?;
            let mut auth = Auth::new();
            auth.basic(true).digest(true);
            easy.http_auth(&auth).map_err(curl_err)?;
        }
        Ok(easy)
    }

    /// Single GET attempt; every body chunk is handed to `sink`.
    pub(crate) fn get_with<F>(&self, url: &str, mut sink: F) -> Result<Response, FetchError>
    where
        F: FnMut(&[u8]) -> std::io::Result<()>,
    {
        let curl_err = |source| FetchError::Curl {
            url: url.to_string(),
            source,
        };
        let mut easy = self.configured_easy(url)?;
        let mut headers = Vec::new();
        let mut sink_error = None;

        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        headers.push(s.trim_end().to_string());
                    }
                    true
                })
                .map_err(curl_err)?;
            transfer
                .write_function(|data| match sink(data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        sink_error = Some(e);
                        Ok(0)
                    }
                })
                .map_err(curl_err)?;
            let performed = transfer.perform();
            drop(transfer);
            if let Some(e) = sink_error.take() {
                return Err(FetchError::Io(e));
            }
            performed.map_err(curl_err)?;
        }

        let code = easy.response_code().map_err(curl_err)?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http {
                url: url.to_string(),
                code,
            });
        }
        Ok(Response { headers })
    }

    /// GET a text document (form list, manifest).
    pub(crate) fn get_text(&self, url: &str) -> Result<(String, Response), FetchError> {
        let mut body = Vec::new();
        let response = self.get_with(url, |chunk| {
            body.extend_from_slice(chunk);
            Ok(())
        })?;
        let text = String::from_utf8(body).map_err(|_| FetchError::NotUtf8 {
            url: url.to_string(),
        })?;
        Ok((text, response))
    }

    /// Single attempt at streaming `url` into `out`, hashing as it goes.
    pub(crate) fn stream_to<W: Write>(&self, url: &str, out: &mut W) -> Result<Downloaded, FetchError> {
        let mut hasher = Md5::new();
        let mut bytes = 0u64;
        self.get_with(url, |chunk| {
            out.write_all(chunk)?;
            hasher.update(chunk);
            bytes += chunk.len() as u64;
            Ok(())
        })?;
        out.flush()?;
        Ok(Downloaded {
            bytes,
            md5: hex::encode(hasher.finalize()),
        })
    }
}
