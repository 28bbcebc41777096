use crate::bucket::BucketKey;

pub fn render_entry(bucket: &BucketKey) -> String {
    page("Waste entry", ENTRY_BODY, ENTRY_SCRIPT).replace("{{BUCKET}}", bucket.as_str())
}

pub fn render_closing() -> String {
    page("Closing", CLOSING_BODY, CLOSING_SCRIPT)
}

fn page(title: &str, body: &str, script: &str) -> String {
    LAYOUT
        .replace("{{TITLE}}", title)
        .replace("{{BODY}}", body)
        .replace("{{SCRIPT}}", script)
}

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --ink: #2b2a28;
      --accent: #da291c;
      --muted: #8b857d;
      --card: #ffffff;
      --rw-done: #74b0ff;
      --cw-done: lightgreen;
      --rw-wait: #e1edfe;
      --cw-wait: #e8ffe8;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      font-family: "Trebuchet MS", sans-serif;
      color: var(--ink);
      background: #f6f4ef;
      padding-bottom: 64px;
    }

    header, main {
      padding: 16px 24px;
    }

    .pad, .categories, .products, .tabs {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    button {
      border: none;
      border-radius: 10px;
      padding: 12px 16px;
      font-size: 1rem;
      cursor: pointer;
      background: var(--card);
      box-shadow: 0 2px 6px rgba(0, 0, 0, 0.12);
    }

    button.active, button.primary {
      background: var(--accent);
      color: white;
    }

    button:disabled {
      opacity: 0.5;
      cursor: default;
    }

    .amount {
      width: 100px;
      height: 100px;
      display: grid;
      place-items: center;
      background: var(--card);
      border-radius: 12px;
      font-size: 2rem;
      cursor: pointer;
    }

    .product img {
      display: block;
      width: 72px;
      height: 72px;
      object-fit: contain;
    }

    li.rw.done { background: var(--rw-done); }
    li.cw.done { background: var(--cw-done); }
    li.rw.wait { background: var(--rw-wait); }
    li.cw.wait { background: var(--cw-wait); }

    ul.lines li {
      list-style: none;
      padding: 6px 10px;
      margin: 4px 0;
      border-radius: 6px;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    footer {
      position: fixed;
      bottom: 0;
      left: 0;
      right: 0;
      display: flex;
      gap: 24px;
      padding: 14px 24px;
      background: var(--card);
    }
  </style>
</head>
<body>
{{BODY}}
  <footer>
    <a href="/">Waste entry</a>
    <a href="/closing">Closing</a>
  </footer>
  <script>
    const api = async (path, body) => {
      const res = await fetch(path, body === undefined ? {} : {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };
    const statusEl = document.getElementById('status');
    const setStatus = (message) => { statusEl.textContent = message; };
  </script>
  <script>{{SCRIPT}}</script>
</body>
</html>
"#;

const ENTRY_BODY: &str = r#"  <header>
    <h1>Waste entry <small>{{BUCKET}}</small></h1>
    <div class="amount" id="amount" title="Tap to clear"></div>
    <p class="status" id="status"></p>
  </header>
  <main>
    <div class="pad" id="pad"></div>
    <h2>Categories</h2>
    <div class="categories" id="categories"></div>
    <div class="products" id="products"></div>
    <h2>Waste list <button id="reset">Clear</button></h2>
    <ul class="lines" id="list"></ul>
    <button class="primary" id="save">Save</button>
  </main>"#;

const CLOSING_BODY: &str = r#"  <header>
    <h1>Closing</h1>
    <p class="status" id="status"></p>
  </header>
  <main>
    <div class="tabs" id="tabs"></div>
    <ul class="lines" id="lines"></ul>
    <button class="primary" id="move">Write off selected</button>
  </main>"#;

const ENTRY_SCRIPT: &str = r#"
    let catalog = [];
    let session = null;

    const renderSession = () => {
      document.getElementById('amount').textContent = session.pending_amount;
      const reserved = catalog[session.category] && catalog[session.category].reserved;
      const keys = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'].concat(reserved ? ['.'] : []);
      const pad = document.getElementById('pad');
      pad.innerHTML = '';
      keys.forEach((digit) => {
        const button = document.createElement('button');
        button.textContent = digit;
        button.onclick = () => update(api('/api/session/digit', { digit }));
        pad.appendChild(button);
      });

      const categories = document.getElementById('categories');
      categories.innerHTML = '';
      catalog.forEach((category, index) => {
        const button = document.createElement('button');
        button.textContent = category.name;
        button.classList.toggle('active', index === session.category);
        button.onclick = () => update(api('/api/session/category', { index }));
        categories.appendChild(button);
      });

      const products = document.getElementById('products');
      products.innerHTML = '';
      const current = catalog[session.category];
      (current && current.products || []).forEach((product) => {
        const button = document.createElement('button');
        button.className = 'product';
        button.innerHTML = `<img src="${product.image_path}" alt=""><span></span>`;
        button.querySelector('span').textContent = product.name;
        button.onclick = () => update(api('/api/session/product', { product: product.system_name }));
        products.appendChild(button);
      });

      const list = document.getElementById('list');
      list.innerHTML = '';
      session.entries.forEach((entry) => {
        const li = document.createElement('li');
        li.textContent = `${entry.product}: ${entry.amount}`;
        list.appendChild(li);
      });
      document.getElementById('save').disabled = session.entries.length === 0;
    };

    const update = (promise) => promise
      .then((next) => { session = next; renderSession(); setStatus(''); })
      .catch((err) => setStatus(err.message));

    document.getElementById('amount').onclick = () => update(api('/api/session/clear', {}));
    document.getElementById('reset').onclick = () => update(api('/api/session/reset', {}));
    document.getElementById('save').onclick = () => {
      setStatus('Saving...');
      api('/api/session/save', {})
        .then(() => update(api('/api/session')).then(() => setStatus('Saved')))
        .catch((err) => setStatus(err.message));
    };

    api('/api/catalog')
      .then((loaded) => { catalog = loaded; return update(api('/api/session')); })
      .catch((err) => setStatus(err.message));
"#;

const CLOSING_SCRIPT: &str = r#"
    let closing = null;
    let activeTab = 0;

    const lineClass = (line) => `${line.reserved ? 'rw' : 'cw'} ${line.state === 'wasted' ? 'done' : 'wait'}`;

    const render = () => {
      const tabs = document.getElementById('tabs');
      tabs.innerHTML = '';
      closing.buckets.forEach((view, index) => {
        const button = document.createElement('button');
        button.textContent = view.bucket;
        button.classList.toggle('active', index === activeTab);
        button.onclick = () => { activeTab = index; render(); };
        tabs.appendChild(button);
      });

      const lines = document.getElementById('lines');
      lines.innerHTML = '';
      const view = closing.buckets[activeTab];
      (view && view.items || []).forEach((line) => {
        const li = document.createElement('li');
        li.className = lineClass(line);
        if (line.state === 'wasted') {
          li.textContent = `${line.item}: ${line.quantity}`;
        } else {
          const label = document.createElement('label');
          const box = document.createElement('input');
          box.type = 'checkbox';
          box.checked = closing.selected.includes(line.key);
          box.onchange = () => load(api('/api/closing/toggle', { item: line.key }));
          label.appendChild(box);
          label.appendChild(document.createTextNode(` ${line.key}: ${line.quantity}`));
          li.appendChild(label);
        }
        lines.appendChild(li);
      });
      document.getElementById('move').disabled = closing.selected.length === 0;
    };

    const load = (promise) => promise
      .then((next) => { closing = next; render(); })
      .catch((err) => setStatus(err.message));

    document.getElementById('move').onclick = () => {
      const view = closing.buckets[activeTab];
      api('/api/closing/move', { bucket: view.bucket })
        .then((result) => {
          closing = result.closing;
          render();
          setStatus(`Moved ${result.report.moved.length} item(s)`);
        })
        .catch((err) => setStatus(err.message));
    };

    load(api('/api/closing'));
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_page_shows_bucket_and_script() {
        let bucket = BucketKey::parse("19-10 1SH").unwrap();
        let html = render_entry(&bucket);
        assert!(html.contains("<small>19-10 1SH</small>"));
        assert!(html.contains("/api/session/save"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn closing_page_wires_move_endpoint() {
        let html = render_closing();
        assert!(html.contains("/api/closing/move"));
        assert!(!html.contains("{{"));
    }
}
