//! Static sections of the runtime script.
//!
//! Attribute and class names come from `ATTR` (the embedded vocabulary),
//! never from string literals here.

pub(super) const STATE: &str = r"const ATTR = CONFIG.protocol;
const state = {
  currentPageId: null,
  redirectTimer: null,
  intervals: new Map(),
  fireworks: new Map(),
  audioSrc: null,
  interacted: false
};
const audio = document.getElementById(ATTR.audioElementId);

function pages() {
  return Array.prototype.filter.call(document.body.children, function (node) {
    return node.classList.contains(ATTR.pageClass);
  });
}

function findPage(pageId) {
  const all = pages();
  for (let i = 0; i < all.length; i++) {
    if (all[i].id === pageId) return all[i];
  }
  return null;
}

function rand(min, max) {
  return min + Math.random() * (max - min);
}

function pick(list) {
  return list[Math.floor(Math.random() * list.length)];
}
";

pub(super) const NAVIGATION: &str = r"function navigateTo(pageId) {
  const target = findPage(pageId);
  if (!target) {
    console.warn('[ura] ignoring navigation to unknown page', pageId);
    return false;
  }
  const outgoing = findPage(state.currentPageId);
  pages().forEach(function (page) {
    page.style.display = page === target ? 'block' : 'none';
  });
  state.currentPageId = target.id;
  try {
    history.replaceState(null, '', '#' + encodeURIComponent(target.id));
  } catch (e) {
    console.debug('[ura] history unavailable', e);
  }
  enterPage(target, outgoing);
  return true;
}

function enterPage(page, outgoing) {
  leaveCurrentPage(outgoing);
  scheduleRedirect(page);
  syncAudio(page);
  startAnimations(page);
}

function leaveCurrentPage(outgoing) {
  if (state.redirectTimer !== null) {
    clearTimeout(state.redirectTimer);
    state.redirectTimer = null;
  }
  state.intervals.forEach(function (handle) {
    clearInterval(handle);
  });
  state.intervals.clear();
  if (!outgoing) return;
  state.fireworks.forEach(function (instance, container) {
    if (outgoing.contains(container)) instance.stop();
  });
}

function scheduleRedirect(page) {
  const target = page.getAttribute(ATTR.redirectTo);
  const delay = parseInt(page.getAttribute(ATTR.redirectDelay) || '', 10);
  if (!target || !(delay > 0)) return;
  state.redirectTimer = setTimeout(function () {
    state.redirectTimer = null;
    navigateTo(target);
  }, delay);
}
";

pub(super) const AUDIO: &str = r"function syncAudio(page) {
  if (!audio) return;
  const src = page.getAttribute(ATTR.audioSrc);
  if (!src) {
    audio.pause();
    if (state.audioSrc !== null) {
      audio.removeAttribute('src');
      audio.load();
    }
    state.audioSrc = null;
    return;
  }
  audio.loop = page.getAttribute(ATTR.audioLoop) !== 'false';
  if (state.audioSrc !== src) {
    state.audioSrc = src;
    audio.src = src;
  }
  if (state.interacted && audio.paused) {
    const playing = audio.play();
    if (playing && playing.catch) {
      playing.catch(function (e) {
        console.warn('[ura] audio playback failed', e);
      });
    }
  }
}

function onFirstInteraction() {
  document.removeEventListener('click', onFirstInteraction, true);
  state.interacted = true;
  const page = findPage(state.currentPageId);
  if (page) syncAudio(page);
}
";

pub(super) const BURSTS: &str = r"function createConfetti(container) {
  const settings = CONFIG.bursts;
  for (let i = 0; i < settings.confettiPieces; i++) {
    const piece = document.createElement('div');
    piece.className = 'confetti-piece';
    piece.style.left = rand(0, 100) + '%';
    piece.style.backgroundColor = pick(settings.confettiColors);
    piece.style.animationDuration = rand(2, 4) + 's';
    piece.style.animationDelay = rand(0, 0.5) + 's';
    container.appendChild(piece);
    setTimeout(function () {
      piece.remove();
    }, 4500);
  }
}

function createSparks(container) {
  const settings = CONFIG.bursts;
  for (let i = 0; i < settings.sparkCount; i++) {
    const spark = document.createElement('div');
    const angle = rand(0, Math.PI * 2);
    const distance = rand(20, 60);
    spark.className = 'spark';
    spark.style.setProperty('--dx', Math.cos(angle) * distance + 'px');
    spark.style.setProperty('--dy', Math.sin(angle) * distance + 'px');
    spark.style.backgroundColor = pick(settings.sparkColors);
    container.appendChild(spark);
    setTimeout(function () {
      spark.remove();
    }, 600);
  }
}
";

pub(super) const FIREWORKS: &str = r"const FW = CONFIG.fireworks;
const PROFILES = {};
FW.profiles.forEach(function (profile) {
  PROFILES[profile.tier] = profile;
});
const GRAVITY = 0.05;
const DRAG = 0.98;

function Fireworks(container, looped) {
  this.container = container;
  this.looped = looped;
  this.canvas = document.createElement('canvas');
  this.canvas.className = 'fireworks-canvas';
  container.appendChild(this.canvas);
  this.ctx = this.canvas.getContext('2d');
  this.rockets = [];
  this.particles = [];
  this.shots = 0;
  this.frame = null;
  this.launchTimer = null;
  this.startedAt = 0;
}

Fireworks.prototype.resize = function () {
  this.canvas.width = Math.max(1, Math.round(this.container.offsetWidth * 2));
  this.canvas.height = Math.max(1, Math.round(this.container.offsetHeight * 2));
};

Fireworks.prototype.spawning = function () {
  return this.looped || performance.now() - this.startedAt < FW.oneShotWindowMs;
};

Fireworks.prototype.nextTier = function () {
  this.shots += 1;
  let tier = 'normal';
  for (let i = 0; i < FW.milestones.length; i++) {
    if (FW.milestones[i][0] === this.shots) tier = FW.milestones[i][1];
  }
  if (tier === 'nuclear') this.shots = 0;
  return tier;
};

Fireworks.prototype.start = function () {
  const self = this;
  this.stop();
  this.resize();
  this.startedAt = performance.now();
  this.scheduleLaunch();
  const tick = function () {
    self.step();
    if (!self.spawning() && self.rockets.length === 0 && self.particles.length === 0) {
      self.frame = null;
      return;
    }
    self.frame = requestAnimationFrame(tick);
  };
  this.frame = requestAnimationFrame(tick);
};

Fireworks.prototype.scheduleLaunch = function () {
  const self = this;
  this.launchTimer = setTimeout(function () {
    self.launchTimer = null;
    if (!self.spawning()) return;
    self.launch();
    self.scheduleLaunch();
  }, rand(FW.intervalMinMs, FW.intervalMaxMs));
};

Fireworks.prototype.launch = function () {
  const width = this.canvas.width;
  const height = this.canvas.height;
  this.rockets.push({
    x: rand(width * 0.3, width * 0.7),
    y: height,
    targetY: rand(height * 0.1, height * 0.45),
    speed: Math.max(2, height / rand(40, 60)),
    trail: [],
    tier: this.nextTier()
  });
};

Fireworks.prototype.explode = function (rocket) {
  const profile = PROFILES[rocket.tier] || PROFILES.normal;
  for (let i = 0; i < profile.particles; i++) {
    const angle = (Math.PI * 2 * i) / profile.particles;
    const speed = rand(profile.speed * 0.4, profile.speed);
    this.particles.push({
      x: rocket.x,
      y: rocket.y,
      vx: Math.cos(angle) * speed,
      vy: Math.sin(angle) * speed,
      radius: profile.radius,
      shadow: profile.shadow,
      color: pick(profile.palette),
      life: profile.life,
      maxLife: profile.life
    });
  }
};

Fireworks.prototype.step = function () {
  const ctx = this.ctx;
  if (!ctx) return;
  ctx.clearRect(0, 0, this.canvas.width, this.canvas.height);

  for (let i = this.rockets.length - 1; i >= 0; i--) {
    const rocket = this.rockets[i];
    rocket.trail.push([rocket.x, rocket.y]);
    if (rocket.trail.length > 8) rocket.trail.shift();
    rocket.y -= rocket.speed;
    ctx.lineWidth = 2;
    for (let j = 1; j <= rocket.trail.length; j++) {
      const from = rocket.trail[j - 1];
      const to = j < rocket.trail.length ? rocket.trail[j] : [rocket.x, rocket.y];
      ctx.strokeStyle = 'rgba(255, 255, 255, ' + (0.7 * j / rocket.trail.length) + ')';
      ctx.beginPath();
      ctx.moveTo(from[0], from[1]);
      ctx.lineTo(to[0], to[1]);
      ctx.stroke();
    }
    if (rocket.y <= rocket.targetY) {
      this.explode(rocket);
      this.rockets.splice(i, 1);
    }
  }

  for (let i = this.particles.length - 1; i >= 0; i--) {
    const p = this.particles[i];
    p.vx *= DRAG;
    p.vy = p.vy * DRAG + GRAVITY;
    p.x += p.vx;
    p.y += p.vy;
    p.life -= 1;
    if (p.life <= 0) {
      this.particles.splice(i, 1);
      continue;
    }
    ctx.globalAlpha = p.life / p.maxLife;
    ctx.shadowBlur = p.shadow;
    ctx.shadowColor = p.color;
    ctx.fillStyle = p.color;
    ctx.beginPath();
    ctx.arc(p.x, p.y, p.radius, 0, Math.PI * 2);
    ctx.fill();
  }
  ctx.globalAlpha = 1;
  ctx.shadowBlur = 0;
};

Fireworks.prototype.stop = function () {
  if (this.frame !== null) {
    cancelAnimationFrame(this.frame);
    this.frame = null;
  }
  if (this.launchTimer !== null) {
    clearTimeout(this.launchTimer);
    this.launchTimer = null;
  }
  this.rockets = [];
  this.particles = [];
  if (this.ctx) this.ctx.clearRect(0, 0, this.canvas.width, this.canvas.height);
};
";

pub(super) const ANIMATIONS: &str = r"function startAnimations(page) {
  const containers = page.querySelectorAll('.' + ATTR.animationContainerClass);
  containers.forEach(function (container) {
    const type = container.getAttribute(ATTR.animation);
    const looped = container.classList.contains(ATTR.loopClass);
    if (type === 'fireworks') {
      let instance = state.fireworks.get(container);
      if (!instance) {
        instance = new Fireworks(container, looped);
        state.fireworks.set(container, instance);
      }
      instance.start();
    } else if (type === 'confetti' || type === 'sparks') {
      const burst = type === 'confetti' ? createConfetti : createSparks;
      burst(container);
      if (looped) {
        const period =
          type === 'confetti' ? CONFIG.bursts.confettiPeriodMs : CONFIG.bursts.sparksPeriodMs;
        state.intervals.set(container, setInterval(function () {
          burst(container);
        }, period));
      }
    }
  });
}
";

pub(super) const LOGIN: &str = r"const loginForms = new Map();
CONFIG.loginForms.forEach(function (form) {
  loginForms.set(JSON.stringify([form.pageId, form.elementId]), form);
});

function onSubmit(event) {
  const form = event.target;
  if (!form || form.tagName !== 'FORM' || form.id.indexOf(ATTR.loginFormPrefix) !== 0) return;
  const page = form.closest('.' + ATTR.pageClass);
  const elementId = form.id.slice(ATTR.loginFormPrefix.length);
  const config = page && loginForms.get(JSON.stringify([page.id, elementId]));
  if (!config) return;
  event.preventDefault();

  const username = form.elements.namedItem('username');
  const password = form.elements.namedItem('password');
  const ok = !!username && !!password &&
    username.value === config.correctUsername &&
    password.value === config.correctPassword;
  const message = ok ? config.successMessage : config.failureMessage;
  const target = ok ? config.successPageId : config.failurePageId;
  if (message) alert(message);
  if (target) navigateTo(target);
}
";

pub(super) const EVENTS: &str = r"function onClick(event) {
  let node = event.target;
  if (node && node.closest) {
    const video = node.closest('video');
    if (video) {
      video.muted = !video.muted;
      return;
    }
  }
  while (node && node.tagName !== 'BUTTON') node = node.parentElement;
  if (!node || node.closest('form')) return;
  const target = node.getAttribute(ATTR.linkTo);
  if (target) navigateTo(target);
}

function fragmentPageId() {
  const raw = location.hash.slice(1);
  try {
    return decodeURIComponent(raw);
  } catch (e) {
    return raw;
  }
}

function onHashChange() {
  const pageId = fragmentPageId();
  if (pageId && pageId !== state.currentPageId) navigateTo(pageId);
}
";

pub(super) const BOOT: &str = r"function boot() {
  const all = pages();
  if (all.length === 0) return;
  document.addEventListener('click', onFirstInteraction, true);
  document.body.addEventListener('click', onClick);
  document.addEventListener('submit', onSubmit);
  window.addEventListener('hashchange', onHashChange);
  const requested = fragmentPageId();
  const initial = (requested && findPage(requested)) || all[0];
  navigateTo(initial.id);
}

if (document.readyState === 'loading') {
  document.addEventListener('DOMContentLoaded', boot);
} else {
  boot();
}
";
