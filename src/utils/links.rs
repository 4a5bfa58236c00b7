use crate::structs::qr_request::Link;

/// What the caller just did, which decides the links it is offered next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Create,
    List,
    Delete,
}

/// Build the HATEOAS links for a QR code resource.
pub fn generate_links(
    action: LinkAction,
    qr_filename: &str,
    base_url: &str,
    download_url: &str,
) -> Vec<Link> {
    match action {
        LinkAction::Create | LinkAction::List => vec![
            Link::new("download", download_url.to_string(), "GET"),
            Link::new(
                "delete",
                format!("{}/qr-codes/{}", base_url, qr_filename),
                "DELETE",
            ),
        ],
        LinkAction::Delete => vec![Link::new("list", format!("{}/qr-codes/", base_url), "GET")],
    }
}
