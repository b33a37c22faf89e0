//! Embedded single-page HTML frontend.
//!
//! The whole chat UI is one HTML constant with inline CSS and JavaScript.
//! It fetches the greeting, then posts each question to `/api/chat`.

/// The complete HTML frontend as a static string.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Персональный ассистент МУИВ</title>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{
  --bg:#eef4fb;
  --panel:#ffffff;
  --header:#2563eb;
  --user:#2563eb;
  --assistant:#f1f5f9;
  --text:#1e293b;
  --muted:#64748b;
  --border:#e2e8f0;
}
html,body{height:100%;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,Helvetica,Arial,sans-serif;background:linear-gradient(135deg,#3b82f6,#34d399);color:var(--text)}
body{display:flex;align-items:center;justify-content:center;padding:16px}
.chat{width:100%;max-width:820px;height:90vh;background:var(--panel);border-radius:16px;box-shadow:0 10px 30px rgba(0,0,0,.15);display:flex;flex-direction:column;overflow:hidden}
.header{background:var(--header);color:#fff;padding:16px 20px;font-size:18px;font-weight:700}
.messages{flex:1;overflow-y:auto;padding:16px 20px;display:flex;flex-direction:column;gap:10px}
.message{max-width:75%;padding:10px 14px;border-radius:12px;line-height:1.5;white-space:pre-wrap;word-wrap:break-word}
.message.user{align-self:flex-end;background:var(--user);color:#fff}
.message.assistant{align-self:flex-start;background:var(--assistant)}
.message.pending{color:var(--muted);font-style:italic}
form{display:flex;gap:8px;padding:12px 16px;border-top:1px solid var(--border)}
input{flex:1;padding:10px 14px;border:1px solid var(--border);border-radius:10px;font-size:15px}
button{padding:10px 18px;border:0;border-radius:10px;background:var(--header);color:#fff;font-size:15px;cursor:pointer}
button:disabled{opacity:.6;cursor:default}
</style>
</head>
<body>
<div class="chat">
  <div class="header">Персональный ассистент МУИВ</div>
  <div class="messages" id="messages"></div>
  <form id="form">
    <input id="question" type="text" placeholder="Введите вопрос" autocomplete="off">
    <button id="send" type="submit">Отправить</button>
  </form>
</div>
<script>
const messages = document.getElementById('messages');
const form = document.getElementById('form');
const input = document.getElementById('question');
const send = document.getElementById('send');

function addMessage(kind, text) {
  const el = document.createElement('div');
  el.className = 'message ' + kind;
  el.textContent = text;
  messages.appendChild(el);
  messages.scrollTop = messages.scrollHeight;
  return el;
}

fetch('/api/greeting')
  .then(r => r.json())
  .then(d => addMessage('assistant', d.greeting))
  .catch(() => {});

form.addEventListener('submit', async (e) => {
  e.preventDefault();
  const question = input.value.trim();
  if (!question) return;
  input.value = '';
  addMessage('user', question);
  const pending = addMessage('assistant pending', '…');
  send.disabled = true;
  try {
    const res = await fetch('/api/chat', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ question }),
    });
    const data = await res.json();
    pending.textContent = data.answer || data.message || 'Извините, произошла ошибка при обработке запроса.';
  } catch (err) {
    pending.textContent = 'Извините, произошла ошибка при обработке запроса.';
  } finally {
    pending.classList.remove('pending');
    send.disabled = false;
    input.focus();
  }
});
</script>
</body>
</html>
"##;
