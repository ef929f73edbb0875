pub const UNSUBSCRIBE_URL: &str = "https://blt.owasp.org/newsletter/unsubscribe/";
pub const CONTACT_URL: &str = "mailto:newsletter@blt.owasp.org";
pub const WEBSITE_URL: &str = "https://blt.owasp.org";

/// Embed rendered newsletter HTML into the branded email document.
///
/// Styles are inline because most email clients ignore `<style>` blocks and
/// never load external stylesheets.
pub fn wrap(content: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>BLT Newsletter</title>
</head>
<body style="margin: 0; padding: 0; background-color: #f8fafc;">
<div style="font-family: Inter, system-ui, -apple-system, sans-serif; line-height: 1.6; color: #334155; max-width: 600px; margin: 0 auto; padding: 20px;">
<div style="background: linear-gradient(135deg, #feeae9 0%, #ffffff 100%); padding: 30px; border-radius: 12px; margin-bottom: 30px;">
<h1 style="margin: 0; color: #dc2626; font-size: 28px; font-weight: 700;">BLT Newsletter</h1>
<p style="margin: 8px 0 0 0; color: #64748b;">Updates from the OWASP Bug Logging Tool community</p>
</div>
<div style="background: #ffffff; padding: 30px; border-radius: 12px; border: 1px solid #e2e8f0;">
{content}</div>
<div style="text-align: center; margin-top: 30px; color: #64748b; font-size: 14px;">
<p style="margin: 0 0 8px 0;">You're receiving this because you subscribed to the BLT Newsletter.</p>
<p style="margin: 0;"><a href="{UNSUBSCRIBE_URL}" style="color: #dc2626;">Unsubscribe</a> &middot; <a href="{CONTACT_URL}" style="color: #dc2626;">Contact us</a> &middot; <a href="{WEBSITE_URL}" style="color: #dc2626;">blt.owasp.org</a></p>
</div>
</div>
</body>
</html>
"##
    )
}
