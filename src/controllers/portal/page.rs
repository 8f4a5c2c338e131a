pub(super) const FORM_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Wi-Fi setup</title>
<style>
body{font-family:sans-serif;max-width:22rem;margin:2rem auto;padding:0 1rem}
input{display:block;width:100%;margin:.3rem 0 1rem;padding:.4rem;box-sizing:border-box}
button{width:100%;padding:.6rem}
</style>
</head>
<body>
<h1>Wi-Fi setup</h1>
<form method="post" action="/save">
<label for="ssid">Network name</label>
<input id="ssid" name="ssid" maxlength="32" required>
<label for="password">Password</label>
<input id="password" name="password" type="password" maxlength="64">
<button type="submit">Save and restart</button>
</form>
</body>
</html>
"#;

pub(super) const SAVED_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Saved</title></head>
<body><h1>Saved</h1><p>The device restarts and joins the network.</p></body>
</html>
"#;

pub(super) const MISSING_SSID_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Error</title></head>
<body><h1>Network name is required</h1><p><a href="/">Back</a></p></body>
</html>
"#;

pub(super) const TOO_LONG_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Error</title></head>
<body><h1>Network name or password is too long</h1><p><a href="/">Back</a></p></body>
</html>
"#;

pub(super) const ENCODING_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Error</title></head>
<body><h1>Malformed form data</h1><p><a href="/">Back</a></p></body>
</html>
"#;
