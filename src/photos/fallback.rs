use super::descriptor::{Attribution, ImageDescriptor, ImageFormat};

const FALLBACK_URLS: [&str; 8] = [
    "https://images.unsplash.com/photo-1443750200537-00fd518bdc82?dpr=2&auto=compress,format&fit=crop&w=376&h=251&q=80&cs=tinysrgb&crop=",
    "https://images.unsplash.com/photo-1451104726450-0a3d58972500?dpr=2&auto=compress,format&fit=crop&w=376&h=251&q=80&cs=tinysrgb&crop=",
    "https://images.unsplash.com/photo-1455287278107-115faab3eafa?dpr=2&auto=compress,format&fit=crop&w=376&h=251&q=80&cs=tinysrgb&crop=",
    "https://images.unsplash.com/photo-1426287658398-5a912ce1ed0a?dpr=2&auto=compress,format&fit=crop&w=376&h=250&q=80&cs=tinysrgb&crop=",
    "https://images.unsplash.com/photo-1437957146754-f6377debe171?dpr=2&auto=compress,format&fit=crop&w=376&h=376&q=80&cs=tinysrgb&crop=",
    "https://images.unsplash.com/photo-1452447224378-04c089d77aa4?dpr=2&auto=compress,format&fit=crop&w=376&h=251&q=80&cs=tinysrgb&crop=",
    "https://images.unsplash.com/photo-1415798408244-83edcac0acca?dpr=2&auto=compress,format&fit=crop&w=376&h=250&q=80&cs=tinysrgb&crop=",
    "https://images.unsplash.com/photo-1455845694919-f0b3826ea301?dpr=2&auto=compress,format&fit=crop&w=376&h=211&q=80&cs=tinysrgb&crop=",
];

const FALLBACK_CREDIT_NAME: &str = "Unsplash";
const FALLBACK_CREDIT_LINK: &str = "https://unsplash.com";

/// Bundled photo set used whenever the live search cannot deliver.
pub fn fallback_images() -> Vec<ImageDescriptor> {
    FALLBACK_URLS
        .iter()
        .map(|url| ImageDescriptor {
            url: (*url).to_string(),
            format: ImageFormat::Landscape,
            attribution: Some(Attribution {
                name: FALLBACK_CREDIT_NAME.to_string(),
                link: FALLBACK_CREDIT_LINK.to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::photos::PAIR_COUNT;

    #[test]
    fn fallback_has_one_image_per_pair() {
        assert_eq!(fallback_images().len(), PAIR_COUNT);
    }

    #[test]
    fn fallback_urls_are_distinct() {
        let images = fallback_images();
        let urls: HashSet<&str> = images.iter().map(|image| image.url.as_str()).collect();
        assert_eq!(urls.len(), images.len());
    }

    #[test]
    fn fallback_is_landscape_and_credited() {
        for image in fallback_images() {
            assert_eq!(image.format, ImageFormat::Landscape);
            assert!(image.attribution.is_some());
        }
    }
}
