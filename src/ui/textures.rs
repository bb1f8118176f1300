use std::cell::RefCell;
use std::rc::Rc;

use gtk4::gdk;
use gtk4::glib;

use super::board::render_board;
use super::state::{AppState, Thumbnail};
use crate::photos::FetchError;
use crate::photos::unsplash::fetch_thumbnail;

fn decode(bytes: Vec<u8>) -> Result<gdk::Texture, glib::Error> {
    gdk::Texture::from_bytes(&glib::Bytes::from_owned(bytes))
}

/// Downloads every photo of the current set that is not cached yet.
///
/// Results from an older load generation are dropped on arrival.
pub(super) fn load_thumbnails(state: &Rc<RefCell<AppState>>) {
    let (urls, agent, generation) = {
        let mut st = state.borrow_mut();
        let Some(game) = &st.game else {
            return;
        };
        let urls: Vec<String> = game
            .images()
            .iter()
            .map(|image| image.url.clone())
            .filter(|url| !st.thumbnails.contains_key(url))
            .collect();
        for url in &urls {
            st.thumbnails.insert(url.clone(), Thumbnail::Loading);
        }
        (urls, st.http_agent.clone(), st.load_generation)
    };

    for url in urls {
        let state = state.clone();
        let agent = agent.clone();
        glib::spawn_future_local(async move {
            let request_url = url.clone();
            let downloaded = gio::spawn_blocking(move || fetch_thumbnail(&agent, &request_url))
                .await
                .unwrap_or_else(|_| Err(FetchError::Transport("download worker panicked".to_string())));

            let thumbnail = match downloaded {
                Ok(bytes) => match decode(bytes) {
                    Ok(texture) => Thumbnail::Ready(texture),
                    Err(err) => {
                        log::warn!("could not decode {url}: {err}");
                        Thumbnail::Failed
                    }
                },
                Err(err) => {
                    log::warn!("could not download {url}: {err}");
                    Thumbnail::Failed
                }
            };

            let mut st = state.borrow_mut();
            if st.load_generation != generation {
                return;
            }
            st.thumbnails.insert(url, thumbnail);
            render_board(&st);
        });
    }
}
